use std::io::Write;

use crate::domain::{ExportError, Game, GameFrame, Point, StillRenderer};

const EMPTY: char = '.';
const FOOD: char = '*';
const HAZARD: char = '!';
// Largest board side drawn as text; anything bigger is not a real game board.
const MAX_BOARD_SIDE: u32 = 1024;

// Plain-text board dump, one row per line with y = 0 at the top.
#[derive(Clone, Copy, Default)]
pub struct AsciiRenderer;

impl StillRenderer for AsciiRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render_still(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frame: &GameFrame,
    ) -> Result<(), ExportError> {
        if game.width > MAX_BOARD_SIDE || game.height > MAX_BOARD_SIDE {
            return Err(ExportError::Render(format!(
                "board {}x{} is too large to render",
                game.width, game.height
            )));
        }

        let text = board_text(game, frame);
        dest.write_all(text.as_bytes())
            .map_err(|err| ExportError::Render(err.to_string()))
    }
}

fn board_text(game: &Game, frame: &GameFrame) -> String {
    let width = game.width as usize;
    let height = game.height as usize;
    let mut grid = vec![vec![EMPTY; width]; height];

    let mut place = |point: &Point, symbol: char| {
        let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
            return;
        };
        if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = symbol;
        }
    };

    for point in &frame.hazards {
        place(point, HAZARD);
    }
    for point in &frame.food {
        place(point, FOOD);
    }

    let mut legend = Vec::new();
    for (index, snake) in frame.snakes.iter().enumerate() {
        let letter = snake_letter(index);
        if snake.is_alive() {
            // Draw tail first so the head wins on stacked segments.
            for point in snake.body.iter().skip(1).rev() {
                place(point, letter);
            }
            if let Some(head) = snake.head() {
                place(head, letter.to_ascii_uppercase());
            }
        }

        let status = match &snake.death {
            Some(death) => format!("dead: {}", death.cause),
            None => format!("health {}", snake.health),
        };
        legend.push(format!(
            "{}: {} ({status})",
            letter.to_ascii_uppercase(),
            snake.name
        ));
    }

    let mut text = format!("Turn: {}\n", frame.turn);
    for row in grid {
        text.extend(row);
        text.push('\n');
    }
    for line in legend {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

fn snake_letter(index: usize) -> char {
    char::from(b'a' + (index % 26) as u8)
}
