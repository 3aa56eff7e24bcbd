//! Utility functions for naming, timestamps, log formatting and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Display names for awesome-list checkouts
//! - Local ISO-8601 timestamps for the run metadata
//! - String truncation for logging
//! - File system validation for output directories

use crate::error::{Error, Result};
use chrono::Local;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Turn a checkout directory name into a display name.
///
/// Hyphens become spaces and the result is title-cased: a letter that
/// follows a non-letter is uppercased, any other letter is lowercased.
///
/// # Arguments
///
/// * `dir_name` - The checkout directory name, e.g. `awesome-rust`
///
/// # Returns
///
/// The display name, e.g. `Awesome Rust`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(list_name_from_dir("awesome-selfhosted"), "Awesome Selfhosted");
/// assert_eq!(list_name_from_dir("awesome-neo4j"), "Awesome Neo4J");
/// ```
pub fn list_name_from_dir(dir_name: &str) -> String {
    let mut out = String::with_capacity(dir_name.len());
    let mut after_letter = false;
    for c in dir_name.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(if c == '-' { ' ' } else { c });
            after_letter = false;
        }
    }
    out
}

/// Current local time as an ISO-8601 string with microseconds and no offset,
/// e.g. `2025-05-06T20:30:00.123456`.
pub fn local_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes (backing off to a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io(path, e))?;

    // Try a small sync write using std fs (simpler error surface)
    let scratch_path = path.join("..__write_check__");
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Error::io(path, e)),
    }
}
