//! Writes the corrected text of the last result to disk.

use crate::checker::model::CheckResult;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the exported file
pub const EXPORT_FILE_NAME: &str = "corrected_text.txt";

/// Write `result.corrected_text` to [`EXPORT_FILE_NAME`] inside `dir`.
///
/// Returns `Ok(None)` without touching the filesystem when there is no
/// result. The content is staged in a temporary file next to the target and
/// moved into place, so a reader never sees a partial file.
pub fn export_corrected(result: Option<&CheckResult>, dir: &Path) -> Result<Option<PathBuf>> {
    let Some(result) = result else {
        return Ok(None);
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let target = dir.join(EXPORT_FILE_NAME);
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    staged
        .write_all(result.corrected_text.as_bytes())
        .context("Failed to write corrected text")?;
    staged.flush().context("Failed to flush corrected text")?;
    staged
        .persist(&target)
        .with_context(|| format!("Failed to write export file: {}", target.display()))?;

    tracing::info!(path = %target.display(), "exported corrected text");
    Ok(Some(target))
}
