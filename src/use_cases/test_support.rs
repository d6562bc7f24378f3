use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    AnimatedRenderer, Diagnostics, ExportError, FrameSource, Game, GameFrame, RequestContext,
    TimingConfig,
};

pub(crate) type CallLog = Arc<Mutex<Vec<(u64, u64)>>>;

pub(crate) fn test_game(id: &str) -> Game {
    Game {
        id: id.to_string(),
        status: "complete".to_string(),
        width: 11,
        height: 11,
        snakes: Vec::new(),
    }
}

pub(crate) fn test_frame(turn: u64) -> GameFrame {
    GameFrame {
        turn,
        snakes: Vec::new(),
        food: Vec::new(),
        hazards: Vec::new(),
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub game: bool,
    // Zero-based index of the frames call that should fail.
    pub frames_call: Option<usize>,
}

// Engine fake holding a single game with `total_frames` turns numbered from 0.
#[derive(Clone)]
pub(crate) struct ScriptedSource {
    game: Game,
    total_frames: u64,
    // Serve more frames than requested to mimic a misbehaving engine.
    overfill: u64,
    calls: CallLog,
    failures: FailureFlags,
}

impl ScriptedSource {
    pub(crate) fn new(total_frames: u64) -> Self {
        Self {
            game: test_game("game-1"),
            total_frames,
            overfill: 0,
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn with_overfill(mut self, overfill: u64) -> Self {
        self.overfill = overfill;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(u64, u64)> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl FrameSource for ScriptedSource {
    async fn game(&self, game_id: &str) -> Result<Game, ExportError> {
        if self.failures.game {
            return Err(ExportError::UpstreamStatus { status: 404 });
        }

        let mut game = self.game.clone();
        game.id = game_id.to_string();
        Ok(game)
    }

    async fn frames(
        &self,
        _game_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<GameFrame>, ExportError> {
        let call_index = {
            let mut guard = self.calls.lock().expect("calls mutex poisoned");
            guard.push((offset, limit));
            guard.len() - 1
        };

        if self.failures.frames_call == Some(call_index) {
            return Err(ExportError::Transport("connection reset".to_string()));
        }

        let end = offset
            .saturating_add(limit)
            .saturating_add(self.overfill)
            .min(self.total_frames);
        Ok((offset..end).map(test_frame).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecoveredInput {
    pub field: String,
    pub raw: String,
}

// Diagnostics fake that keeps everything it was told.
#[derive(Clone, Default)]
pub(crate) struct RecordingDiagnostics {
    recovered: Arc<Mutex<Vec<RecoveredInput>>>,
    failures: Arc<Mutex<Vec<(RequestContext, String)>>>,
}

impl RecordingDiagnostics {
    pub(crate) fn recovered(&self) -> Vec<RecoveredInput> {
        self.recovered
            .lock()
            .expect("recovered mutex poisoned")
            .clone()
    }

    pub(crate) fn failures(&self) -> Vec<(RequestContext, String)> {
        self.failures.lock().expect("failures mutex poisoned").clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn input_recovered(&self, field: &str, raw: &str, _reason: &str) {
        let mut guard = self.recovered.lock().expect("recovered mutex poisoned");
        guard.push(RecoveredInput {
            field: field.to_string(),
            raw: raw.to_string(),
        });
    }

    fn request_failed(&self, request: &RequestContext, error: &ExportError) {
        let mut guard = self.failures.lock().expect("failures mutex poisoned");
        guard.push((request.clone(), error.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderCall {
    pub game_id: String,
    pub turns: Vec<u64>,
    pub frame_delay_ms: u32,
    pub loop_delay_ms: u32,
}

// Renderer fake that records its inputs and writes a short marker.
#[derive(Clone, Default)]
pub(crate) struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
    fail: bool,
}

impl RecordingRenderer {
    pub(crate) const DEFAULT_TIMING: TimingConfig = TimingConfig {
        frame_delay_ms: 80,
        loop_delay_ms: 2000,
    };

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().expect("render mutex poisoned").clone()
    }
}

impl AnimatedRenderer for RecordingRenderer {
    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    fn default_timing(&self) -> TimingConfig {
        Self::DEFAULT_TIMING
    }

    fn render_animated(
        &self,
        dest: &mut dyn Write,
        game: &Game,
        frames: &[GameFrame],
        frame_delay_ms: u32,
        loop_delay_ms: u32,
    ) -> Result<(), ExportError> {
        if self.fail {
            return Err(ExportError::Render("encoder exploded".to_string()));
        }

        let mut guard = self.calls.lock().expect("render mutex poisoned");
        guard.push(RenderCall {
            game_id: game.id.clone(),
            turns: frames.iter().map(|frame| frame.turn).collect(),
            frame_delay_ms,
            loop_delay_ms,
        });
        dest.write_all(b"rendered")
            .map_err(|err| ExportError::Render(err.to_string()))
    }
}
