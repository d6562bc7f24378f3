// Domain layer: engine documents, fetch plans and the ports use cases depend on.

pub mod entities;
pub mod errors;
pub mod plan;
pub mod ports;

pub use entities::{Death, Game, GameFrame, Participant, Point, Snake};
pub use errors::ExportError;
pub use plan::{FetchPlan, FrameCount, TimingConfig};
pub use ports::{AnimatedRenderer, Diagnostics, FrameSource, RequestContext, StillRenderer};
