//! Fetcher: one URL to one file, with retries and validation.
//!
//! `Fetch` is the seam the task orchestrator depends on; `CurlFetcher` is the
//! libcurl-backed implementation; `file:` URLs are copied from disk instead.
//! A fetch never returns an error: every outcome is a `FetchStatus` the
//! orchestrator can classify.

mod local;
mod transfer;

pub(crate) use local::local_file_path;

use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use crate::validate::is_valid_pdf;
use std::path::Path;
use std::time::Duration;

/// Default user agent; some report hosts reject clients without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Result of fetching one URL (after retries and validation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// No URL was given; nothing was attempted.
    NoUrl,
    /// Bytes were written and the file is a PDF with pages.
    ValidPdf,
    /// Bytes were written but the file is not a usable PDF. Left on disk.
    CorruptPdf,
    /// Every attempt failed; carries the last attempt's error.
    Failed(FetchError),
}

/// Transport settings for each fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Attempt count and inter-attempt delay.
    pub retry: RetryPolicy,
    /// Per-attempt limit for connecting and for a stalled transfer.
    pub timeout: Duration,
    /// Verify TLS certificates and host names. Off only by explicit opt-in.
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(10),
            verify_tls: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetches a URL into a destination file.
pub trait Fetch {
    /// Downloads `url` to `destination`, overwriting it, and reports the outcome.
    /// The destination's parent directory must exist.
    fn fetch(&self, url: &str, destination: &Path) -> FetchStatus;
}

/// HTTP(S) fetcher built on libcurl. Blocking; run it off the async runtime.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> FetchStatus {
        let url = url.trim();
        if url.is_empty() {
            return FetchStatus::NoUrl;
        }
        if let Some(source) = local_file_path(url) {
            return match local::copy_to(&source, destination) {
                Ok(bytes) => {
                    tracing::info!(url, bytes, path = %destination.display(), "copied local file");
                    validated(url, destination)
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, "local copy failed");
                    FetchStatus::Failed(e)
                }
            };
        }
        if let Err(e) = check_url(url) {
            tracing::warn!(url, error = %e, "refusing to fetch");
            return FetchStatus::Failed(e);
        }

        let res = run_with_retry(&self.options.retry, |attempt| {
            tracing::debug!(url, attempt, "GET");
            transfer::get_to_file(url, destination, &self.options)
        });

        match res {
            Ok(bytes) => {
                tracing::info!(url, bytes, path = %destination.display(), "download successful");
                validated(url, destination)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "download failed");
                FetchStatus::Failed(e)
            }
        }
    }
}

fn validated(url: &str, destination: &Path) -> FetchStatus {
    if is_valid_pdf(destination) {
        FetchStatus::ValidPdf
    } else {
        tracing::warn!(url, path = %destination.display(), "downloaded file is not a valid pdf");
        FetchStatus::CorruptPdf
    }
}

/// Only absolute http(s) URLs are fetched over the network.
fn check_url(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, other
        ))),
    }
}
