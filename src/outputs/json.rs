//! JSON corpus files.
//!
//! The corpus is written as a pretty-printed JSON array (2-space indent,
//! UTF-8). Every write replaces the whole file.

use crate::error::{Error, Result};
use crate::models::Corpus;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the corpus to `path`, creating the parent directory if needed.
///
/// # Arguments
///
/// * `path` - Destination file, replaced as a whole
/// * `corpus` - The lists to serialize
///
/// # Returns
///
/// `Ok(())` on success.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written. Both are fatal for the run.
#[instrument(level = "info", skip_all, fields(path = %path.display(), lists = corpus.len()))]
pub async fn write_corpus(path: &Path, corpus: &Corpus) -> Result<()> {
    write_pretty(path, corpus).await?;
    info!("Wrote corpus JSON");
    Ok(())
}

/// Load a corpus previously written by [`write_corpus`].
///
/// # Arguments
///
/// * `path` - The corpus JSON file
///
/// # Returns
///
/// The deserialized [`Corpus`].
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Json`] if
/// it does not hold a corpus.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_corpus(path: &Path) -> Result<Corpus> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    let corpus: Corpus = serde_json::from_str(&raw).map_err(|e| Error::json(path, e))?;
    info!(lists = corpus.len(), "Loaded corpus JSON");
    Ok(corpus)
}

/// Path of the backup copy kept next to `input`: `<input>.backup`.
pub fn backup_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Write `corpus` to the backup path of `input` and return that path.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub async fn write_backup(input: &Path, corpus: &Corpus) -> Result<PathBuf> {
    let backup = backup_path(input);
    write_pretty(&backup, corpus).await?;
    info!(path = %backup.display(), "Backup created");
    Ok(backup)
}

/// Serialize `value` with 2-space indentation and replace `path` with it.
pub(crate) async fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(Error::io(parent, e));
        }
    }

    fs::write(path, json).await.map_err(|e| Error::io(path, e))
}
