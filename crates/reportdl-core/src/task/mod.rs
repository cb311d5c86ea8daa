//! Task orchestrator: turns one record into one final status.
//!
//! Order of decisions for a record:
//! 1. no URL at all → `NoUrlAvailable`, no I/O;
//! 2. primary is a `file:` URL → copy it or report it missing (the secondary
//!    URL is never consulted in this case);
//! 3. fetch the primary; on failure (or when it is absent) fetch the secondary,
//!    which may itself be a `file:` URL;
//! 4. map the last fetch into the status vocabulary.

mod record;
mod status;

pub use record::Record;
pub use status::TaskStatus;

use crate::fetch::{local_file_path, Fetch, FetchStatus};
use std::fs;
use std::path::{Path, PathBuf};

/// Runs records against a fetcher, writing into one output directory.
#[derive(Debug)]
pub struct Orchestrator<F> {
    fetcher: F,
    output_dir: PathBuf,
}

impl<F: Fetch> Orchestrator<F> {
    /// `output_dir` must exist before tasks run.
    pub fn new(fetcher: F, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes one record to completion and returns `(id, status)`.
    pub fn run_task(&self, record: &Record) -> (String, TaskStatus) {
        let destination = record.destination_in(&self.output_dir);
        tracing::info!(
            id = record.id(),
            primary = record.primary_url().unwrap_or("-"),
            path = %destination.display(),
            "attempting download"
        );
        let status = self.resolve(record, &destination);
        tracing::info!(id = record.id(), status = %status, "task finished");
        (record.id().to_string(), status)
    }

    fn resolve(&self, record: &Record, destination: &Path) -> TaskStatus {
        let primary = record.primary_url();
        let secondary = record.secondary_url();

        if primary.is_none() && secondary.is_none() {
            return TaskStatus::NoUrlAvailable;
        }

        if let Some(local) = primary.and_then(local_file_path) {
            return copy_local(&local, destination);
        }

        let first = match primary {
            Some(url) => self.fetcher.fetch(url, destination),
            None => FetchStatus::NoUrl,
        };

        match (first, secondary) {
            (FetchStatus::ValidPdf, _) => TaskStatus::ValidPdf,
            (FetchStatus::CorruptPdf, _) => TaskStatus::CorruptPdf,
            (_, Some(alt)) => {
                tracing::info!(id = record.id(), url = alt, "trying alternative URL");
                alternative_status(self.fetcher.fetch(alt, destination))
            }
            (FetchStatus::Failed(e), None) => TaskStatus::FailedPrimaryError(e.to_string()),
            (FetchStatus::NoUrl, None) => {
                TaskStatus::FailedPrimaryError("No URL provided".to_string())
            }
        }
    }
}

/// Maps the secondary URL's fetch into the "via alternative" vocabulary.
fn alternative_status(status: FetchStatus) -> TaskStatus {
    match status {
        FetchStatus::ValidPdf => TaskStatus::ValidPdfViaAlternative,
        FetchStatus::CorruptPdf => TaskStatus::CorruptPdfViaAlternative,
        FetchStatus::Failed(e) if e.is_http() => TaskStatus::FailedAlternativeError(e.to_string()),
        FetchStatus::Failed(_) | FetchStatus::NoUrl => TaskStatus::FailedAlternativeGeneric,
    }
}

fn copy_local(source: &Path, destination: &Path) -> TaskStatus {
    if !source.exists() {
        tracing::warn!(path = %source.display(), "local file not found");
        return TaskStatus::LocalFileMissing;
    }
    match fs::copy(source, destination) {
        Ok(_) => {
            tracing::info!(from = %source.display(), to = %destination.display(), "copied local file");
            TaskStatus::DownloadedFromLocalFile
        }
        Err(e) => {
            tracing::warn!(path = %source.display(), error = %e, "local copy failed");
            TaskStatus::FailedPrimaryError(format!("copy {}: {}", source.display(), e))
        }
    }
}
