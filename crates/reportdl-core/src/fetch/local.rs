//! `file:` URLs are copied from disk instead of fetched.

use crate::retry::FetchError;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the local path for a `file:` URL, `None` for any other URL.
pub(crate) fn local_file_path(url: &str) -> Option<PathBuf> {
    let parsed = url::Url::parse(url).ok()?;
    if parsed.scheme() != "file" {
        return None;
    }
    // `file://host/...` has no local path; keep the raw path so it reports as missing.
    Some(
        parsed
            .to_file_path()
            .unwrap_or_else(|_| PathBuf::from(parsed.path())),
    )
}

/// Copies `source` over `destination`. Returns bytes copied.
pub(super) fn copy_to(source: &Path, destination: &Path) -> Result<u64, FetchError> {
    if !source.exists() {
        return Err(FetchError::Local(format!("{} not found", source.display())));
    }
    fs::copy(source, destination)
        .map_err(|e| FetchError::Local(format!("copy {}: {}", source.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_scheme_detection() {
        assert_eq!(
            local_file_path("file:///tmp/a.pdf"),
            Some(PathBuf::from("/tmp/a.pdf"))
        );
        assert_eq!(local_file_path("http://ok.test/a.pdf"), None);
        assert_eq!(local_file_path("not a url"), None);
    }

    #[test]
    fn missing_source_leaves_destination_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        std::fs::write(&dest, b"previous").unwrap();
        let err = copy_to(&dir.path().join("nope.pdf"), &dest).unwrap_err();
        assert!(matches!(err, FetchError::Local(_)));
        assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
    }

    #[test]
    fn copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.pdf");
        let dest = dir.path().join("out.pdf");
        std::fs::write(&src, b"%PDF-1.4 body").unwrap();
        assert_eq!(copy_to(&src, &dest).unwrap(), 13);
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.4 body");
    }
}
