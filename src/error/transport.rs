use std::time::Duration;

use thiserror::Error;

/// Failure of a single outbound call or of the resources a strategy needs to
/// issue it. Any of these aborts the enclosing strategy run.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request timed out after {}ms: {source}", timeout.as_millis())]
    Timeout {
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build runtime: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },
    #[error("Call task failed: {source}")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl TransportError {
    /// Classifies a client error, separating per-call timeouts from other
    /// connection and protocol failures.
    #[must_use]
    pub fn from_request(source: reqwest::Error, timeout: Duration) -> Self {
        if source.is_timeout() {
            TransportError::Timeout { timeout, source }
        } else {
            TransportError::Request { source }
        }
    }

    /// Same as [`TransportError::from_request`] for errors raised while
    /// draining the body.
    #[must_use]
    pub fn from_body(source: reqwest::Error, timeout: Duration) -> Self {
        if source.is_timeout() {
            TransportError::Timeout { timeout, source }
        } else {
            TransportError::Body { source }
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }
}
