use crate::domain::{AnimatedRenderer, Diagnostics, FrameSource, StillRenderer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    // One pooled engine client shared by every request.
    pub engine: Arc<dyn FrameSource>,
    pub ascii: Arc<dyn StillRenderer>,
    pub still_gif: Arc<dyn StillRenderer>,
    pub animation: Arc<dyn AnimatedRenderer>,
    pub diagnostics: Arc<dyn Diagnostics>,
    // Where the bare index route redirects to.
    pub home_url: String,
}
