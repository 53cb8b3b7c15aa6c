//! Event sources and the sequential replay loop.
//!
//! The core consumes reserve updates one at a time; ordering and
//! exactly-once delivery are the source's responsibility. A JSONL file
//! replays in line order; a channel source lets an embedding feed live
//! events through the same seam.

use crate::sync::{ReserveUpdate, SyncProcessor};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::sync::mpsc;
use tracing::info;

/// Errors from reading or decoding an event stream.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The underlying stream failed.
    #[error("failed to read event stream: {0}")]
    Io(#[from] std::io::Error),
    /// A line did not decode as a reserve update.
    #[error("malformed reserve update: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An ordered source of reserve-update events.
#[async_trait]
pub trait EventSource: Send {
    /// Next event, or `None` when the stream is exhausted.
    async fn next(&mut self) -> Result<Option<ReserveUpdate>, IngestError>;
}

/// Replays a JSONL file of reserve updates in line order.
pub struct FileEventSource {
    lines: Lines<BufReader<File>>,
}

impl FileEventSource {
    /// Opens the file for streaming.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let file = File::open(path).await?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

#[async_trait]
impl EventSource for FileEventSource {
    async fn next(&mut self) -> Result<Option<ReserveUpdate>, IngestError> {
        loop {
            match self.lines.next_line().await? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(serde_json::from_str(&line)?)),
                None => return Ok(None),
            }
        }
    }
}

/// Receives reserve updates over a bounded channel.
pub struct ChannelEventSource {
    receiver: mpsc::Receiver<ReserveUpdate>,
}

impl ChannelEventSource {
    /// Creates the source and its sending half.
    #[must_use]
    pub fn new(buffer: usize) -> (mpsc::Sender<ReserveUpdate>, Self) {
        let (sender, receiver) = mpsc::channel(buffer);
        (sender, Self { receiver })
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn next(&mut self) -> Result<Option<ReserveUpdate>, IngestError> {
        Ok(self.receiver.recv().await)
    }
}

/// Drains a source through the processor, strictly in order.
///
/// Returns the number of events applied. An ingest error stops the loop;
/// transitions already applied stay committed.
///
/// # Errors
/// Returns the first [`IngestError`] raised by the source.
pub async fn run(
    processor: &mut SyncProcessor,
    source: &mut dyn EventSource,
) -> Result<u64, IngestError> {
    let mut processed = 0u64;
    while let Some(event) = source.next().await? {
        processor.handle_reserve_update(&event);
        processed += 1;
    }
    info!(processed, "event stream drained");
    Ok(processed)
}
