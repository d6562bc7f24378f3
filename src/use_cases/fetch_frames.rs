use crate::domain::{ExportError, FetchPlan, FrameSource, Game, GameFrame};

// Upper bound the engine accepts for a single frames page.
pub const MAX_BATCH_SIZE: u64 = 100;

// Paginated retrieval against the engine port.
pub struct FrameFetcher<S> {
    pub source: S,
}

impl<S> FrameFetcher<S>
where
    S: FrameSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[tracing::instrument(name = "fetch_game", skip(self))]
    pub async fn fetch_game(&self, game_id: &str) -> Result<Game, ExportError> {
        self.source.game(game_id).await
    }

    #[tracing::instrument(name = "fetch_single_frame", skip(self))]
    pub async fn fetch_single_frame(
        &self,
        game_id: &str,
        frame: u64,
    ) -> Result<GameFrame, ExportError> {
        self.source
            .frames(game_id, frame, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ExportError::FrameNotFound {
                game_id: game_id.to_string(),
                frame,
            })
    }

    // Batches are issued strictly one after another; each offset depends on
    // the previous batch. Any failed batch discards everything gathered so far.
    #[tracing::instrument(
        name = "fetch_frames",
        skip(self, plan),
        fields(offset = plan.offset, count = ?plan.count)
    )]
    pub async fn fetch_frames(
        &self,
        game_id: &str,
        plan: FetchPlan,
    ) -> Result<Vec<GameFrame>, ExportError> {
        let requested = plan.count.limit();
        if requested == Some(0) {
            return Ok(Vec::new());
        }

        let mut frames = Vec::new();
        let mut offset = plan.offset;
        let mut remaining = requested;

        loop {
            let batch_size = match remaining {
                Some(remaining) if remaining < MAX_BATCH_SIZE => remaining,
                _ => MAX_BATCH_SIZE,
            };

            let batch = self.source.frames(game_id, offset, batch_size).await?;
            let received = batch.len() as u64;
            tracing::debug!(offset, batch_size, received, "frame batch fetched");

            frames.extend(batch.into_iter().take(batch_size as usize));

            let exhausted = received < batch_size;
            let satisfied = requested.is_some_and(|wanted| frames.len() as u64 >= wanted);
            if exhausted || satisfied {
                break;
            }

            offset += batch_size;
            if let Some(remaining) = remaining.as_mut() {
                *remaining -= batch_size;
            }
        }

        Ok(frames)
    }
}
