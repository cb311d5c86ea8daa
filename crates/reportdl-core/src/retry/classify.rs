//! Classify curl errors and fetch errors for retry decisions.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Convert a curl error into a fetch error, keeping curl's description.
pub fn classify_curl_error(e: &curl::Error) -> FetchError {
    if e.is_operation_timedout() {
        return FetchError::Timeout(e.to_string());
    }
    if e.is_write_error() {
        return FetchError::Io(e.to_string());
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return FetchError::InvalidUrl(e.to_string());
    }
    FetchError::Transport(e.to_string())
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Timeout(_) => ErrorKind::Timeout,
        FetchError::Transport(_) => ErrorKind::Connection,
        FetchError::Http { code, .. } => ErrorKind::Http(*code),
        FetchError::Io(_) => ErrorKind::Storage,
        FetchError::InvalidUrl(_) | FetchError::Local(_) => ErrorKind::Fatal,
    }
}
