//! `reportdl run <sheet.csv>` – download pending records and record statuses.

use anyhow::{Context, Result};
use reportdl_core::batch;
use reportdl_core::config::ReportdlConfig;
use reportdl_core::fetch::{CurlFetcher, FetchOptions};
use reportdl_core::metadata;
use reportdl_core::records;
use reportdl_core::task::{Orchestrator, TaskStatus};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub async fn run_batch(
    cfg: &ReportdlConfig,
    input: &Path,
    metadata_path: Option<&Path>,
    limit: Option<usize>,
) -> Result<()> {
    let output_dir = cfg.output_dir.as_path();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let all = records::read_records(input, &cfg.columns)?;
    let total = all.len();
    let pending = records::pending(all, output_dir, limit);
    if pending.is_empty() {
        println!("No pending records ({} in sheet).", total);
        return Ok(());
    }

    let options = FetchOptions::from(&cfg.fetch);
    if !options.verify_tls {
        tracing::warn!("TLS certificate verification is disabled");
    }
    let orchestrator = Arc::new(Orchestrator::new(CurlFetcher::new(options), output_dir));

    println!(
        "Downloading {} of {} record(s) into {} ({} at a time)",
        pending.len(),
        total,
        output_dir.display(),
        cfg.max_concurrent.max(1)
    );

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<(String, TaskStatus)>(16);
    let printer = tokio::spawn(async move {
        while let Some((id, status)) = progress_rx.recv().await {
            println!("  {}: {}", id, status);
        }
    });

    let results =
        batch::run_all(orchestrator, pending, cfg.max_concurrent, Some(progress_tx)).await;
    let _ = printer.await;

    print_summary(&results);

    match metadata_path {
        Some(path) => {
            metadata::write_statuses(path, &cfg.columns, &results)?;
            println!("Metadata updated: {}", path.display());
        }
        None => tracing::info!("no metadata file given; statuses not persisted"),
    }
    Ok(())
}

fn print_summary(results: &HashMap<String, TaskStatus>) {
    let valid = results.values().filter(|s| s.is_valid_pdf()).count();
    let other_files = results
        .values()
        .filter(|s| s.is_downloaded() && !s.is_valid_pdf())
        .count();
    let failed = results.len() - valid - other_files;
    println!(
        "Done: {} valid PDF(s), {} other file(s) saved, {} without file",
        valid, other_files, failed
    );
    tracing::info!(valid, other_files, failed, "run completed");
}
