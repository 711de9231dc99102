//! Logging setup
//!
//! The terminal belongs to the TUI, so events go to a log file in the data
//! directory. The filter comes from `RUST_LOG`, then `PROOFREAD_LOG`, then
//! defaults to `proofread=info`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{prelude::*, EnvFilter};

pub const LOG_ENV: &str = "PROOFREAD_LOG";
pub const LOG_FILE: &str = "proofread.log";

const DEFAULT_FILTER: &str = "proofread=info";

/// Directory holding the log file, e.g. `~/.local/share/proofread/`.
pub fn data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "proofread")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

fn env_filter() -> EnvFilter {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV))
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a file subscriber writing to `dir/proofread.log`. Returns the log
/// file path.
pub fn initialize_logging(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    let log_path = dir.join(LOG_FILE);
    let log_file = fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(log_path)
}
