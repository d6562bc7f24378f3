use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;

use crate::domain::entities::{Game, GameFrame};
use crate::domain::errors::ExportError;
use crate::domain::plan::TimingConfig;

// Port for the remote engine. Use cases depend on this trait, not on the
// concrete HTTP client.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn game(&self, game_id: &str) -> Result<Game, ExportError>;
    async fn frames(
        &self,
        game_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<GameFrame>, ExportError>;
}

// Port for single-frame output (text or image).
pub trait StillRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn render_still(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frame: &GameFrame,
    ) -> Result<(), ExportError>;
}

// Port for multi-frame output. Implementations declare the delays used when a
// request does not supply usable ones.
pub trait AnimatedRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn default_timing(&self) -> TimingConfig;
    fn render_animated(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frames: &[GameFrame],
        frame_delay_ms: u32,
        loop_delay_ms: u32,
    ) -> Result<(), ExportError>;
}

// Request metadata attached to boundary failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub url: String,
    pub user_agent: String,
    pub referrer: String,
}

// Port for the logging side-channel, injected instead of reached globally.
pub trait Diagnostics: Send + Sync {
    fn input_recovered(&self, field: &str, raw: &str, reason: &str);
    fn request_failed(&self, request: &RequestContext, error: &ExportError);
}

// Shared adapters live behind Arc in the app state; let them satisfy the ports
// directly so use cases can stay generic.
#[async_trait]
impl<T: FrameSource + ?Sized> FrameSource for Arc<T> {
    async fn game(&self, game_id: &str) -> Result<Game, ExportError> {
        (**self).game(game_id).await
    }

    async fn frames(
        &self,
        game_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<GameFrame>, ExportError> {
        (**self).frames(game_id, offset, limit).await
    }
}

impl<T: StillRenderer + ?Sized> StillRenderer for Arc<T> {
    fn content_type(&self) -> &'static str {
        (**self).content_type()
    }

    fn render_still(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frame: &GameFrame,
    ) -> Result<(), ExportError> {
        (**self).render_still(dest, game, frame)
    }
}

impl<T: AnimatedRenderer + ?Sized> AnimatedRenderer for Arc<T> {
    fn content_type(&self) -> &'static str {
        (**self).content_type()
    }

    fn default_timing(&self) -> TimingConfig {
        (**self).default_timing()
    }

    fn render_animated(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frames: &[GameFrame],
        frame_delay_ms: u32,
        loop_delay_ms: u32,
    ) -> Result<(), ExportError> {
        (**self).render_animated(dest, game, frames, frame_delay_ms, loop_delay_ms)
    }
}

impl<T: Diagnostics + ?Sized> Diagnostics for Arc<T> {
    fn input_recovered(&self, field: &str, raw: &str, reason: &str) {
        (**self).input_recovered(field, raw, reason)
    }

    fn request_failed(&self, request: &RequestContext, error: &ExportError) {
        (**self).request_failed(request, error)
    }
}
