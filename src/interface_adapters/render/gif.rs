use std::io::Write;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

use crate::domain::{
    AnimatedRenderer, ExportError, Game, GameFrame, Point, StillRenderer, TimingConfig,
};

pub const GIF_FRAME_DELAY_MS: u32 = 80;
pub const GIF_LOOP_DELAY_MS: u32 = 2000;

const CELL_SIZE: u32 = 20;
const CELL_INSET: u32 = 1;
const FOOD_INSET: u32 = 6;

const BACKGROUND: Rgba<u8> = Rgba([32, 32, 40, 255]);
const EMPTY_CELL: Rgba<u8> = Rgba([48, 48, 60, 255]);
const HAZARD_CELL: Rgba<u8> = Rgba([90, 60, 60, 255]);
const FOOD_COLOR: Rgba<u8> = Rgba([255, 92, 117, 255]);
const PALETTE: [Rgba<u8>; 6] = [
    Rgba([0, 170, 255, 255]),
    Rgba([255, 200, 0, 255]),
    Rgba([120, 220, 80, 255]),
    Rgba([200, 110, 255, 255]),
    Rgba([255, 140, 60, 255]),
    Rgba([230, 230, 230, 255]),
];

// Pixel renderer producing GIF stills and looping GIF animations.
#[derive(Clone, Copy, Default)]
pub struct GifRenderer;

impl StillRenderer for GifRenderer {
    fn content_type(&self) -> &'static str {
        "image/gif"
    }

    fn render_still(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frame: &GameFrame,
    ) -> Result<(), ExportError> {
        let mut encoder = GifEncoder::new(dest);
        encode(&mut encoder, draw_frame(game, frame)?, GIF_FRAME_DELAY_MS)
    }
}

impl AnimatedRenderer for GifRenderer {
    fn content_type(&self) -> &'static str {
        "image/gif"
    }

    fn default_timing(&self) -> TimingConfig {
        TimingConfig {
            frame_delay_ms: GIF_FRAME_DELAY_MS,
            loop_delay_ms: GIF_LOOP_DELAY_MS,
        }
    }

    fn render_animated(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frames: &[GameFrame],
        frame_delay_ms: u32,
        loop_delay_ms: u32,
    ) -> Result<(), ExportError> {
        if frames.is_empty() {
            return Err(ExportError::Render("no frames to render".to_string()));
        }

        let mut encoder = GifEncoder::new(dest);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|err| ExportError::Render(err.to_string()))?;

        let last = frames.len() - 1;
        for (index, frame) in frames.iter().enumerate() {
            // The last frame is held for the loop delay before restarting.
            let delay_ms = if index == last {
                loop_delay_ms
            } else {
                frame_delay_ms
            };
            encode(&mut encoder, draw_frame(game, frame)?, delay_ms)?;
        }
        Ok(())
    }
}

fn encode<W: Write>(
    encoder: &mut GifEncoder<W>,
    image: RgbaImage,
    delay_ms: u32,
) -> Result<(), ExportError> {
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    encoder
        .encode_frame(Frame::from_parts(image, 0, 0, delay))
        .map_err(|err| ExportError::Render(err.to_string()))
}

fn draw_frame(game: &Game, frame: &GameFrame) -> Result<RgbaImage, ExportError> {
    let width = game.width.max(1);
    let height = game.height.max(1);
    let (Some(pixel_width), Some(pixel_height)) = (pixel_extent(width), pixel_extent(height))
    else {
        return Err(ExportError::Render(format!(
            "board {}x{} is too large to render",
            game.width, game.height
        )));
    };
    let mut image = RgbaImage::from_pixel(pixel_width, pixel_height, BACKGROUND);

    for y in 0..height {
        for x in 0..width {
            fill_cell(&mut image, x, y, CELL_INSET, EMPTY_CELL);
        }
    }
    for point in &frame.hazards {
        fill_point(&mut image, point, CELL_INSET, HAZARD_CELL);
    }
    for point in &frame.food {
        fill_point(&mut image, point, FOOD_INSET, FOOD_COLOR);
    }
    for (index, snake) in frame.snakes.iter().enumerate() {
        if !snake.is_alive() {
            continue;
        }
        let color = parse_hex_color(&snake.color).unwrap_or(PALETTE[index % PALETTE.len()]);
        for point in &snake.body {
            fill_point(&mut image, point, CELL_INSET, color);
        }
    }

    Ok(image)
}

// GIF logical screen dimensions are 16-bit.
fn pixel_extent(cells: u32) -> Option<u32> {
    cells
        .checked_mul(CELL_SIZE)
        .filter(|&pixels| pixels <= u32::from(u16::MAX))
}

fn fill_point(image: &mut RgbaImage, point: &Point, inset: u32, color: Rgba<u8>) {
    if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
        fill_cell(image, x, y, inset, color);
    }
}

// Out-of-board cells are silently skipped. The image is a whole number of
// cells, so any in-board cell lies fully inside it.
fn fill_cell(image: &mut RgbaImage, x: u32, y: u32, inset: u32, color: Rgba<u8>) {
    if x >= image.width() / CELL_SIZE || y >= image.height() / CELL_SIZE {
        return;
    }
    let left = x * CELL_SIZE;
    let top = y * CELL_SIZE;

    for py in top + inset..top + CELL_SIZE - inset {
        for px in left + inset..left + CELL_SIZE - inset {
            image.put_pixel(px, py, color);
        }
    }
}

fn parse_hex_color(raw: &str) -> Option<Rgba<u8>> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}
