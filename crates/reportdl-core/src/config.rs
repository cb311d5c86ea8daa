use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::batch::DEFAULT_MAX_CONCURRENT;
use crate::fetch::{FetchOptions, DEFAULT_USER_AGENT};
use crate::retry::RetryPolicy;

/// Per-URL transfer settings (`[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total attempts per URL (including the first).
    pub retries: u32,
    /// Pause between attempts in seconds (e.g. 0.5 = 500ms).
    pub retry_delay_secs: f64,
    /// Connect / stalled-transfer timeout per attempt in seconds.
    pub timeout_secs: u64,
    /// Verify TLS certificates. Set to false only for hosts with broken chains.
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay_secs: 2.0,
            timeout_secs: 10,
            verify_tls: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&FetchConfig> for FetchOptions {
    fn from(cfg: &FetchConfig) -> Self {
        FetchOptions {
            retry: RetryPolicy {
                max_attempts: cfg.retries,
                delay: Duration::try_from_secs_f64(cfg.retry_delay_secs).unwrap_or(Duration::ZERO),
            },
            timeout: Duration::from_secs(cfg.timeout_secs),
            verify_tls: cfg.verify_tls,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Spreadsheet column names (`[columns]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Unique record id; also the destination file stem.
    pub id: String,
    /// Primary PDF URL.
    pub primary: String,
    /// Fallback URL, used when the primary fails.
    pub secondary: String,
    /// Metadata column receiving the status text.
    pub status: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            id: "BRnum".to_string(),
            primary: "Pdf_URL".to_string(),
            secondary: "Report Html Address".to_string(),
            status: "pdf_downloaded".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/reportdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportdlConfig {
    /// Records processed at once.
    pub max_concurrent: usize,
    /// Where `{id}.pdf` files are written (created if missing).
    pub output_dir: PathBuf,
    pub fetch: FetchConfig,
    pub columns: ColumnConfig,
}

impl Default for ReportdlConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            output_dir: PathBuf::from("output/downloads"),
            fetch: FetchConfig::default(),
            columns: ColumnConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("reportdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReportdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ReportdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path; missing keys take defaults.
pub fn load_from(path: &Path) -> Result<ReportdlConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ReportdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
