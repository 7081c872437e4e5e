//! Log sinks receiving request/response records.

use std::sync::{Arc, Mutex};

use crate::http::header::Header;

/// One structured log record, keyed by correlation ID.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub correlation_id: String,
    pub message: &'static str,
    pub fields: LogFields,
}

/// Fields of a [`LogEntry`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogFields {
    /// Emitted before the request is sent.
    Request {
        method: String,
        url: String,
        header: Header,
        body: String,
    },
    /// Emitted when the transport failed; no response exists.
    TransportError { url: String, error: String },
    /// Emitted after a response was received.
    Response {
        latency: String,
        status: String,
        header: Header,
        body: String,
        url: String,
    },
}

/// Destination for log records. Writing never fails from the caller's side.
pub trait LogSink: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// Emits records as `tracing` events at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, entry: &LogEntry) {
        let correlation_id = entry.correlation_id.as_str();
        match &entry.fields {
            LogFields::Request {
                method,
                url,
                header,
                body,
            } => tracing::info!(
                correlation_id,
                method = %method,
                url = %url,
                header = ?header,
                body = %body,
                "{}",
                entry.message
            ),
            LogFields::TransportError { url, error } => tracing::info!(
                correlation_id,
                url = %url,
                error = %error,
                "{}",
                entry.message
            ),
            LogFields::Response {
                latency,
                status,
                header,
                body,
                url,
            } => tracing::info!(
                correlation_id,
                latency = %latency,
                status = %status,
                header = ?header,
                body = %body,
                url = %url,
                "{}",
                entry.message
            ),
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records written so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for RecordingSink {
    fn log(&self, entry: &LogEntry) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry.clone()),
            Err(poisoned) => poisoned.into_inner().push(entry.clone()),
        }
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, entry: &LogEntry) {
        (**self).log(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> LogEntry {
        LogEntry {
            correlation_id: id.to_string(),
            message: "test",
            fields: LogFields::TransportError {
                url: "http://h/x".into(),
                error: "refused".into(),
            },
        }
    }

    #[test]
    fn test_recording_sink_shares_entries_across_clones() {
        let sink = RecordingSink::new();
        let clone = sink.clone();
        clone.log(&entry("a"));
        sink.log(&entry("b"));

        let ids: Vec<_> = sink.entries().into_iter().map(|e| e.correlation_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.log(&entry("a"));
    }
}
