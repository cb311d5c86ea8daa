//! One spreadsheet row: an id and up to two candidate URLs.

use crate::naming;
use std::path::{Path, PathBuf};

/// Immutable snapshot of a record handed to a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: String,
    primary_url: Option<String>,
    secondary_url: Option<String>,
}

impl Record {
    /// Builds a record; blank or whitespace-only URLs become absent.
    pub fn new(
        id: impl Into<String>,
        primary_url: Option<String>,
        secondary_url: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            primary_url: non_blank(primary_url),
            secondary_url: non_blank(secondary_url),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn primary_url(&self) -> Option<&str> {
        self.primary_url.as_deref()
    }

    pub fn secondary_url(&self) -> Option<&str> {
        self.secondary_url.as_deref()
    }

    /// `{output_dir}/{id}.pdf`, with the id sanitized for the filesystem.
    pub fn destination_in(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(naming::pdf_file_name(&self.id))
    }
}

fn non_blank(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}
