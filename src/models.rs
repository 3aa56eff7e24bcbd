//! Data models for extracted awesome lists and run bookkeeping.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Resource`]: One catalogued item (name, link, description, tags)
//! - [`Category`]: A thematic grouping of resources inside a list
//! - [`AwesomeList`]: Everything extracted from one source repository
//! - [`Corpus`]: The aggregated output across all processed lists
//! - [`UrlStats`] and [`FilterReport`]: URL validation statistics
//! - [`RunMetadata`]: The persisted run record
//!
//! All types serialize with `serde` so the corpus written to disk can be
//! read back by the standalone filter command.

use serde::{Deserialize, Serialize};

/// A single catalogued item extracted from a list item or table row.
///
/// `url` is kept exactly as written in the source document. It is only
/// checked when URL filtering or statistics are requested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// The link text, trimmed. Never empty.
    pub name: String,
    /// The raw `href` of the link, trimmed but otherwise unvalidated.
    pub url: String,
    /// Free text surrounding the link.
    pub description: String,
    /// Inline code spans found in the description, in order of appearance.
    pub tags: Vec<String>,
}

/// A thematic grouping of resources, usually one heading section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub resources: Vec<Resource>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
        }
    }
}

/// Everything extracted from one awesome-list README.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AwesomeList {
    /// Human-readable name derived from the checkout directory.
    pub name: String,
    pub categories: Vec<Category>,
}

impl AwesomeList {
    /// Total number of resources across all categories.
    pub fn resource_count(&self) -> usize {
        self.categories.iter().map(|c| c.resources.len()).sum()
    }
}

/// The final output artifact: one entry per processed repository.
pub type Corpus = Vec<AwesomeList>;

/// Valid/invalid URL counts over a corpus.
///
/// Percentages are computed against `max(total, 1)`, so an empty corpus
/// reports `0.0` for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct UrlStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub valid_percent: f64,
    pub invalid_percent: f64,
}

impl UrlStats {
    /// Build the record from raw counts.
    pub fn from_counts(valid: usize, invalid: usize) -> Self {
        let total = valid + invalid;
        let denom = total.max(1) as f64;
        Self {
            total,
            valid,
            invalid,
            valid_percent: valid as f64 / denom * 100.0,
            invalid_percent: invalid as f64 / denom * 100.0,
        }
    }
}

/// Summary produced by filtering an existing corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct FilterReport {
    pub total_resources: usize,
    pub removed_resources: usize,
    /// Share of removed resources, rounded to two decimals.
    pub percentage_removed: f64,
}

impl From<UrlStats> for FilterReport {
    fn from(stats: UrlStats) -> Self {
        Self {
            total_resources: stats.total,
            removed_resources: stats.invalid,
            percentage_removed: (stats.invalid_percent * 100.0).round() / 100.0,
        }
    }
}

/// The persisted run record stored next to the corpus as `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunMetadata {
    /// Local ISO-8601 timestamp of the last successful update.
    pub last_updated: String,
    /// Number of updates so far, starting at 1.
    pub update_count: u64,
}
