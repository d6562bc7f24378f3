use crate::domain::ExportError;
use axum::body::{Body, Bytes};
use futures::{StreamExt, TryStreamExt, future, stream};
use std::io::{self, BufWriter, Write};
use tokio::sync::mpsc;

// Chunks in flight between the render thread and the response body.
const CHANNEL_CAPACITY: usize = 16;
const CHUNK_SIZE: usize = 64 * 1024;

type Chunk = Result<Bytes, ExportError>;

// Blocking `Write` that forwards every chunk to the response body channel.
struct ChannelWriter {
    tx: mpsc::Sender<Chunk>,
    sent: usize,
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response stream closed"))?;
        self.sent += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `render` on the blocking pool and streams its output as a response body.
///
/// Resolves once the first chunk is produced. A render that fails before
/// emitting anything returns the error, so the caller can still answer with an
/// error status. Failures after that point can no longer change the status;
/// they abort the body and are handed to `on_late_failure`.
pub async fn stream_render<F, L>(render: F, on_late_failure: L) -> Result<Body, ExportError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), ExportError> + Send + 'static,
    L: FnMut(&ExportError) + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Chunk>(CHANNEL_CAPACITY);
    let span = tracing::Span::current();

    let task = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        let channel = ChannelWriter {
            tx: tx.clone(),
            sent: 0,
        };
        let mut writer = BufWriter::with_capacity(CHUNK_SIZE, channel);

        let result = render(&mut writer)
            .and_then(|()| writer.flush().map_err(|err| ExportError::Render(err.to_string())));
        match result {
            Ok(()) => {
                tracing::debug!(bytes = writer.get_ref().sent, "render streamed");
            }
            Err(err) => {
                // Drop unsent output so nothing follows the error.
                let _ = writer.into_parts();
                let _ = tx.blocking_send(Err(err));
            }
        }
    });

    let first = match rx.recv().await {
        Some(Ok(chunk)) => chunk,
        Some(Err(err)) => return Err(err),
        None => {
            // Channel closed without output: an empty render or a panic.
            task.await.map_err(|err| ExportError::Render(err.to_string()))?;
            return Ok(Body::empty());
        }
    };

    let rest = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });
    let chunks = stream::once(future::ready(Ok::<_, ExportError>(first)))
        .chain(rest)
        .inspect_err(on_late_failure);

    Ok(Body::from_stream(chunks))
}
