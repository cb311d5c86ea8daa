//! Error produced by a single fetch attempt.

use thiserror::Error;

/// Why one transfer attempt failed.
///
/// Messages are kept as strings so the error can be cloned into a final
/// status and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    #[error("{}", http_message(*code, reason))]
    Http { code: u32, reason: String },
    /// Connect phase or transfer stalled for longer than the attempt timeout.
    #[error("{0}")]
    Timeout(String),
    /// Connection refused, DNS failure, reset, TLS failure, etc.
    #[error("{0}")]
    Transport(String),
    /// Writing the destination file failed.
    #[error("write failed: {0}")]
    Io(String),
    /// URL could not be parsed or uses a scheme we do not fetch.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// A `file:` URL points at nothing readable.
    #[error("local file: {0}")]
    Local(String),
}

impl FetchError {
    /// True when the failure carries a structured HTTP status code.
    pub fn is_http(&self) -> bool {
        matches!(self, FetchError::Http { .. })
    }
}

fn http_message(code: u32, reason: &str) -> String {
    if reason.is_empty() {
        format!("HTTP Error {}", code)
    } else {
        format!("HTTP Error {}: {}", code, reason)
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        super::classify_curl_error(&e)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e.to_string())
    }
}
