//! Final per-record outcome and its metadata wording.

use std::fmt;

/// The categorical result recorded for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Neither URL was present; nothing was attempted.
    NoUrlAvailable,
    /// Primary URL was a `file:` reference and the file was copied.
    DownloadedFromLocalFile,
    /// Primary URL was a `file:` reference to a path that does not exist.
    LocalFileMissing,
    ValidPdf,
    CorruptPdf,
    ValidPdfViaAlternative,
    CorruptPdfViaAlternative,
    /// Secondary URL failed with an HTTP status; carries its description.
    FailedAlternativeError(String),
    /// Secondary URL failed without an HTTP status (timeout, connection, ...).
    FailedAlternativeGeneric,
    /// Primary URL failed and there was no secondary; carries the last error.
    FailedPrimaryError(String),
}

impl TaskStatus {
    /// True when a file was placed at the destination (valid or not).
    pub fn is_downloaded(&self) -> bool {
        matches!(
            self,
            TaskStatus::DownloadedFromLocalFile
                | TaskStatus::ValidPdf
                | TaskStatus::CorruptPdf
                | TaskStatus::ValidPdfViaAlternative
                | TaskStatus::CorruptPdfViaAlternative
        )
    }

    /// True when the placed file passed validation.
    pub fn is_valid_pdf(&self) -> bool {
        matches!(self, TaskStatus::ValidPdf | TaskStatus::ValidPdfViaAlternative)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NoUrlAvailable => write!(f, "No, because no URL is available"),
            TaskStatus::DownloadedFromLocalFile => write!(f, "Yes, from local file"),
            TaskStatus::LocalFileMissing => write!(f, "No, because local file is missing"),
            TaskStatus::ValidPdf => write!(f, "Yes, valid PDF"),
            TaskStatus::CorruptPdf => write!(f, "Yes, but file error (corrupt PDF)"),
            TaskStatus::ValidPdfViaAlternative => write!(f, "Yes, by alternative URL"),
            TaskStatus::CorruptPdfViaAlternative => {
                write!(f, "Yes, but second URL file error (corrupt PDF)")
            }
            TaskStatus::FailedAlternativeError(details) => {
                write!(f, "No, because of second URL error: {}", details)
            }
            TaskStatus::FailedAlternativeGeneric => write!(f, "No, because second URL failed"),
            TaskStatus::FailedPrimaryError(details) => write!(f, "No. Error: {}", details),
        }
    }
}
