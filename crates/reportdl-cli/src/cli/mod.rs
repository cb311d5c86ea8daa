//! CLI for the reportdl PDF report downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reportdl_core::config::{self, ReportdlConfig};
use std::path::PathBuf;

use commands::{run_batch, run_check};

/// Top-level CLI for reportdl.
#[derive(Debug, Parser)]
#[command(name = "reportdl")]
#[command(about = "reportdl: bulk PDF report downloader with validation", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/reportdl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the PDF of every pending record in a CSV sheet.
    Run {
        /// CSV sheet with id, primary URL and (optional) secondary URL columns.
        input: PathBuf,

        /// Metadata CSV that receives one status per processed record.
        #[arg(long, value_name = "PATH")]
        metadata: Option<PathBuf>,

        /// Directory for `{id}.pdf` files (overrides config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Process up to N records at once (overrides config, default 5).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,

        /// Only process the first N pending records.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Skip TLS certificate verification for this run.
        #[arg(long)]
        insecure: bool,
    },

    /// Check whether files open as PDFs with at least one page.
    Check {
        /// Files to check.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                input,
                metadata,
                output_dir,
                jobs,
                limit,
                insecure,
            } => {
                let mut cfg = match &cli.config {
                    Some(path) => config::load_from(path)?,
                    None => config::load_or_init()?,
                };
                apply_overrides(&mut cfg, output_dir, jobs, insecure);
                tracing::debug!("loaded config: {:?}", cfg);
                run_batch(&cfg, &input, metadata.as_deref(), limit).await?;
            }
            CliCommand::Check { paths } => run_check(&paths)?,
        }

        Ok(())
    }
}

/// Command-line flags win over the config file for one run.
fn apply_overrides(
    cfg: &mut ReportdlConfig,
    output_dir: Option<PathBuf>,
    jobs: Option<usize>,
    insecure: bool,
) {
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    if let Some(n) = jobs {
        cfg.max_concurrent = n;
    }
    if insecure {
        cfg.fetch.verify_tls = false;
    }
}

#[cfg(test)]
mod tests;
