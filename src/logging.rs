//! Log setup for the binary.
//!
//! The interactive game owns the terminal, so logs go to the file named by
//! `SLIDE_BLOCKS_LOG`; without it nothing is installed and every `tracing`
//! macro is a no-op. Filtering follows `RUST_LOG` (default `info`).

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_ENV: &str = "SLIDE_BLOCKS_LOG";

/// Log destination from the environment, if any
pub fn log_path_from_env() -> Option<PathBuf> {
    std::env::var_os(LOG_FILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Install the global subscriber. Returns false when logging stays off.
pub fn init() -> Result<bool> {
    let Some(path) = log_path_from_env() else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))?;
    Ok(true)
}
