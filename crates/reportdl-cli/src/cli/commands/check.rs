//! `reportdl check <file>...` – report whether files are valid PDFs.

use anyhow::Result;
use reportdl_core::validate::is_valid_pdf;
use std::path::PathBuf;

/// Prints one verdict per file; fails if any file is not a valid PDF.
pub fn run_check(paths: &[PathBuf]) -> Result<()> {
    let mut invalid = 0usize;
    for path in paths {
        if is_valid_pdf(path) {
            println!("valid    {}", path.display());
        } else {
            println!("invalid  {}", path.display());
            invalid += 1;
        }
    }
    if invalid > 0 {
        anyhow::bail!("{} of {} file(s) are not valid PDFs", invalid, paths.len());
    }
    Ok(())
}
