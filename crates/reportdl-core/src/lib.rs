pub mod config;
pub mod logging;

// Download-and-validate pipeline.
pub mod batch;
pub mod fetch;
pub mod naming;
pub mod retry;
pub mod task;
pub mod validate;

// Spreadsheet plumbing around the pipeline.
pub mod metadata;
pub mod records;

// Shared with the integration tests.
#[cfg(test)]
#[path = "../tests/common/pdf.rs"]
mod test_pdf;
