// Renderer adapters behind the still/animated ports.

pub mod ascii;
pub mod gif;

pub use ascii::AsciiRenderer;
pub use gif::{GIF_FRAME_DELAY_MS, GIF_LOOP_DELAY_MS, GifRenderer};
