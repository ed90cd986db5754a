//! Gateway error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong talking to the service.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GatewayErrorKind {
    /// Connection refused, reset, DNS failure and the like.
    #[display("network error: {}", _0)]
    Network(String),
    /// No response within the request timeout.
    #[display("request timed out")]
    Timeout,
    /// The service answered with a non-success status.
    #[display("service returned HTTP {}{}", code, status_detail(message))]
    Status {
        /// HTTP status code.
        code: u16,
        /// Message from the service's error body, if it sent one.
        message: Option<String>,
    },
    /// The response body did not match the expected shape.
    #[display("malformed response: {}", _0)]
    Malformed(String),
}

fn status_detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Gateway error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Gateway error: {} at {}:{}", kind, file, line)]
pub struct GatewayError {
    /// Error details.
    pub kind: GatewayErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GatewayError {
    /// Creates a new gateway error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Message suitable for the status line.
    pub fn summary(&self) -> String {
        self.kind.to_string()
    }
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::new(GatewayErrorKind::Malformed(err.to_string()))
        } else if err.is_timeout() {
            Self::new(GatewayErrorKind::Timeout)
        } else if let Some(status) = err.status() {
            Self::new(GatewayErrorKind::Status {
                code: status.as_u16(),
                message: None,
            })
        } else {
            Self::new(GatewayErrorKind::Network(err.to_string()))
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(GatewayErrorKind::Malformed(err.to_string()))
    }
}
