use std::io::Write;

use crate::domain::{
    AnimatedRenderer, Diagnostics, ExportError, FrameSource, Game, GameFrame, TimingConfig,
};
use crate::use_cases::fetch_frames::FrameFetcher;
use crate::use_cases::frame_range::parse_frame_range;

// Raw, unvalidated animation inputs as they arrive on the request.
#[derive(Debug, Clone, Default)]
pub struct AnimationRequest {
    pub frames: Option<String>,
    pub frame_delay: Option<String>,
    pub loop_delay: Option<String>,
}

// Fetched frames and resolved timing, ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAnimation {
    pub game: Game,
    pub frames: Vec<GameFrame>,
    pub timing: TimingConfig,
}

// Animation use case with injected dependencies.
pub struct AnimationAssembler<S, R, D> {
    pub fetcher: FrameFetcher<S>,
    pub renderer: R,
    pub diagnostics: D,
}

impl<S, R, D> AnimationAssembler<S, R, D>
where
    S: FrameSource,
    R: AnimatedRenderer,
    D: Diagnostics,
{
    // Each delay falls back to the renderer default on its own.
    pub fn resolve_timing(
        &self,
        frame_delay: Option<&str>,
        loop_delay: Option<&str>,
    ) -> TimingConfig {
        let defaults = self.renderer.default_timing();
        TimingConfig {
            frame_delay_ms: self.parse_delay("frameDelay", frame_delay, defaults.frame_delay_ms),
            loop_delay_ms: self.parse_delay("loopDelay", loop_delay, defaults.loop_delay_ms),
        }
    }

    pub fn render(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frames: &[GameFrame],
        timing: TimingConfig,
    ) -> Result<(), ExportError> {
        self.renderer.render_animated(
            dest,
            game,
            frames,
            timing.frame_delay_ms,
            timing.loop_delay_ms,
        )
    }

    // Everything up to the render: game lookup, range, frames and timing.
    #[tracing::instrument(name = "prepare_animation", skip(self, request))]
    pub async fn prepare(
        &self,
        game_id: &str,
        request: &AnimationRequest,
    ) -> Result<PreparedAnimation, ExportError> {
        let game = self.fetcher.fetch_game(game_id).await?;
        let plan = parse_frame_range(request.frames.as_deref(), &self.diagnostics);
        let frames = self.fetcher.fetch_frames(&game.id, plan).await?;
        let timing = self.resolve_timing(
            request.frame_delay.as_deref(),
            request.loop_delay.as_deref(),
        );

        tracing::debug!(
            frames = frames.len(),
            frame_delay_ms = timing.frame_delay_ms,
            loop_delay_ms = timing.loop_delay_ms,
            "animation prepared"
        );
        Ok(PreparedAnimation {
            game,
            frames,
            timing,
        })
    }

    pub async fn export<W: Write + Send>(
        &self,
        game_id: &str,
        request: &AnimationRequest,
        dest: &mut W,
    ) -> Result<(), ExportError> {
        let prepared = self.prepare(game_id, request).await?;
        self.render(dest, &prepared.game, &prepared.frames, prepared.timing)
    }

    fn parse_delay(&self, field: &str, raw: Option<&str>, default: u32) -> u32 {
        let Some(raw) = raw else {
            return default;
        };

        match raw.parse::<u32>() {
            Ok(delay) if delay > 0 => delay,
            Ok(_) => {
                self.diagnostics
                    .input_recovered(field, raw, "delay must be positive");
                default
            }
            Err(err) => {
                self.diagnostics.input_recovered(field, raw, &err.to_string());
                default
            }
        }
    }
}
