//! Debug observations emitted by the client when `Config::debug` is set.

use std::fmt;

/// One observation from a generate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent {
    /// Emitted before the request is dispatched.
    Request {
        method: String,
        url: String,
        body: String,
    },
    /// Emitted after a successful response has been read.
    Response {
        filename: String,
        generation_time_ms: i64,
        content_length: u64,
    },
}

impl fmt::Display for DebugEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { method, url, body } => {
                write!(f, "Request: {} {} Body: {}", method, url, body)
            }
            Self::Response {
                filename,
                generation_time_ms,
                content_length,
            } => write!(
                f,
                "Response: filename={}, time={}ms, size={}",
                filename, generation_time_ms, content_length
            ),
        }
    }
}

/// Receives [`DebugEvent`]s from a [`crate::Client`].
///
/// Sinks must not affect the call; they only observe it.
pub trait DebugSink: Send + Sync {
    fn record(&self, event: &DebugEvent);
}

/// Default sink: writes events as `tracing` debug records under the
/// `documentstack` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn record(&self, event: &DebugEvent) {
        match event {
            DebugEvent::Request { method, url, body } => {
                tracing::debug!(target: "documentstack", %method, %url, %body, "request");
            }
            DebugEvent::Response {
                filename,
                generation_time_ms,
                content_length,
            } => {
                tracing::debug!(
                    target: "documentstack",
                    %filename,
                    generation_time_ms,
                    content_length,
                    "response"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_log_lines() {
        let event = DebugEvent::Request {
            method: "POST".to_string(),
            url: "https://api.documentstack.dev/api/v1/generate/t1".to_string(),
            body: "{}".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Request: POST https://api.documentstack.dev/api/v1/generate/t1 Body: {}"
        );

        let event = DebugEvent::Response {
            filename: "invoice.pdf".to_string(),
            generation_time_ms: 120,
            content_length: 2048,
        };
        assert_eq!(
            event.to_string(),
            "Response: filename=invoice.pdf, time=120ms, size=2048"
        );
    }

    #[test]
    fn tracing_sink_accepts_events_without_subscriber() {
        TracingSink.record(&DebugEvent::Response {
            filename: "a.pdf".to_string(),
            generation_time_ms: 0,
            content_length: 0,
        });
    }
}
