//! Run metadata bookkeeping.
//!
//! `metadata.json` records when the corpus was last refreshed and how many
//! refreshes have happened. A missing or unreadable record starts the count
//! over instead of failing the run.

use super::json::write_pretty;
use crate::error::Result;
use crate::models::RunMetadata;
use crate::utils::local_timestamp;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// File name of the run record inside the output directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Read the previous count, bump it and stamp the current time.
///
/// # Arguments
///
/// * `output_dir` - Directory holding `metadata.json`
///
/// # Returns
///
/// The record that was written.
///
/// # Errors
///
/// Only writing the record can fail.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn update_metadata(output_dir: &Path) -> Result<RunMetadata> {
    let path = output_dir.join(METADATA_FILE);
    let previous = previous_count(&path).await;

    let metadata = RunMetadata {
        last_updated: local_timestamp(),
        update_count: previous + 1,
    };
    write_pretty(&path, &metadata).await?;

    info!(
        last_updated = %metadata.last_updated,
        update_count = metadata.update_count,
        "Updated metadata"
    );
    Ok(metadata)
}

/// The stored `update_count`, or 0 when the record is missing or corrupt.
async fn previous_count(path: &Path) -> u64 {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return 0,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error reading metadata");
            return 0;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => value
            .get("update_count")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error reading metadata");
            0
        }
    }
}
