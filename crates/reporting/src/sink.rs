//! Report persistence sinks

use crate::payload::ReportPayload;
use crate::ReportError;
use async_trait::async_trait;
use ring_buffer::SharedRingBuffer;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Default number of reports kept by the in-memory sink
pub const DEFAULT_RETENTION: usize = 100;

/// Destination for finished reports
#[async_trait]
pub trait ReportSink: Send + Sync {
    fn name(&self) -> &str;

    async fn store(&self, payload: &ReportPayload) -> Result<(), ReportError>;
}

/// Bounded in-memory report store; the oldest report is dropped when full
#[derive(Debug)]
pub struct InMemorySink {
    reports: SharedRingBuffer<ReportPayload>,
}

impl InMemorySink {
    pub fn new(retention: usize) -> Self {
        info!(retention, "Creating in-memory report sink");
        Self {
            reports: SharedRingBuffer::new(retention),
        }
    }

    /// Stored reports, oldest first
    pub fn reports(&self) -> Vec<ReportPayload> {
        self.reports.snapshot()
    }

    pub fn latest(&self) -> Option<ReportPayload> {
        self.reports.with_read(|buffer| buffer.latest().cloned())
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

#[async_trait]
impl ReportSink for InMemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn store(&self, payload: &ReportPayload) -> Result<(), ReportError> {
        if let Some(evicted) = self.reports.push(payload.clone()) {
            debug!(report_id = %evicted.id, "Evicted oldest report");
        }
        Ok(())
    }
}

/// Appends one JSON document per line to a file
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    // Serializes appends so concurrent dispatches never interleave lines
    write_lock: Mutex<()>,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(path = %path.display(), "Creating NDJSON report sink");
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sink_error(&self, reason: impl ToString) -> ReportError {
        ReportError::Sink {
            sink: self.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ReportSink for JsonLinesSink {
    fn name(&self) -> &str {
        "ndjson"
    }

    async fn store(&self, payload: &ReportPayload) -> Result<(), ReportError> {
        let mut line = payload.to_json()?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.sink_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.sink_error(e))?;
        file.flush().await.map_err(|e| self.sink_error(e))?;

        debug!(report_id = %payload.id, path = %self.path.display(), "Report appended");
        Ok(())
    }
}
