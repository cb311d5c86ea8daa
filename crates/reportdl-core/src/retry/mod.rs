//! Retry policy for fetch attempts.
//!
//! Every transport failure (connection, timeout, non-2xx status, disk write)
//! is retried after a fixed delay until the attempt budget runs out. The loop
//! hands back the last error so callers can report it verbatim.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
