use crate::error::Result;
use crate::gctrace::parser::parse_line;
use crate::gctrace::types::GcRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Line counters for the input stream. Never reset.
#[derive(Debug, Default)]
pub struct ReaderStats {
    accepted: AtomicU64,
    dropped: AtomicU64,
}

impl ReaderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Reads gctrace lines until end of input, forwarding every decodable line
/// in order. Lines that fail to parse are dropped.
///
/// The channel closes when this returns and `tx` is dropped.
pub async fn read_records<R>(
    reader: R,
    tx: mpsc::Sender<GcRecord>,
    stats: &ReaderStats,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.split(b'\n');

    while let Some(raw) = lines.next_segment().await? {
        let raw = raw.strip_suffix(b"\r").unwrap_or(&raw);
        let line = String::from_utf8_lossy(raw);

        match parse_line(&line) {
            Ok(record) => {
                stats.accepted.fetch_add(1, Ordering::Relaxed);
                if tx.send(record).await.is_err() {
                    tracing::debug!("record receiver closed, stopping reader");
                    return Ok(());
                }
            }
            Err(err) => {
                stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(error = %err, line = %line, "dropping gctrace line");
            }
        }
    }

    tracing::info!(
        accepted = stats.accepted(),
        dropped = stats.dropped(),
        "end of gctrace input"
    );
    Ok(())
}
