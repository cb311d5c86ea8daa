//! PDF structure check.
//!
//! A downloaded file counts as a PDF when `lopdf` can load it and its page
//! tree yields at least one page. The check never fails: missing, empty,
//! truncated or non-PDF files are simply reported as invalid.

use std::panic;
use std::path::Path;

/// Returns true if `path` opens as a PDF document with one or more pages.
pub fn is_valid_pdf(path: &Path) -> bool {
    // lopdf can panic on malformed input; that counts as invalid too.
    let loaded = panic::catch_unwind(|| {
        lopdf::Document::load(path).map(|doc| doc.get_pages().len())
    });
    match loaded {
        Ok(Ok(pages)) => {
            if pages == 0 {
                tracing::debug!(path = %path.display(), "pdf has no pages");
            }
            pages > 0
        }
        Ok(Err(e)) => {
            tracing::debug!(path = %path.display(), error = %e, "not a readable pdf");
            false
        }
        Err(_) => {
            tracing::warn!(path = %path.display(), "pdf parser panicked");
            false
        }
    }
}
