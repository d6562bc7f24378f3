use std::fmt;

// Domain-level errors for export workflows. User numeric input never ends up
// here; it is recovered with a default before reaching the fetch path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    Transport(String),
    UpstreamStatus { status: u16 },
    Decode(String),
    FrameNotFound { game_id: String, frame: u64 },
    Render(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Transport(err) => write!(f, "engine transport error: {err}"),
            ExportError::UpstreamStatus { status } => {
                write!(f, "got non-success status from engine: {status}")
            }
            ExportError::Decode(err) => write!(f, "engine response decode error: {err}"),
            ExportError::FrameNotFound { game_id, frame } => {
                write!(f, "frame {frame} not found for game {game_id}")
            }
            ExportError::Render(err) => write!(f, "render error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}
