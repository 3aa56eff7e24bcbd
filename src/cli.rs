//! Command-line interface definitions for awesome_lists.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Global options can also be provided via environment variables.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the awesome_lists application.
///
/// # Examples
///
/// ```sh
/// # Sync every repository, extract with URL filtering, update metadata
/// awesome_lists run --source-dir awesome-lists-sources --output-dir data
///
/// # Extract only, reporting URL statistics without filtering
/// awesome_lists extract --url-stats
///
/// # Filter an existing corpus in place, keeping a backup
/// awesome_lists filter --input data/awesome-lists.json --replace
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory for per-command log files
    #[arg(long, global = true, env = "AWESOME_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sync repositories, extract with URL filtering and update metadata
    Run(RunArgs),
    /// Clone or pull the configured repositories
    Sync(SyncArgs),
    /// Extract structured data from checked-out repositories
    Extract(ExtractArgs),
    /// Remove resources with invalid URLs from an existing corpus file
    Filter(FilterArgs),
}

impl Command {
    /// Log file stem used for this command.
    pub fn log_name(&self) -> &'static str {
        match self {
            Command::Run(_) => "main",
            Command::Sync(_) => "update_awesome_lists",
            Command::Extract(_) => "extraction",
            Command::Filter(_) => "url_filtering",
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory to store repositories
    #[arg(long, default_value = "awesome-lists-sources")]
    pub source_dir: PathBuf,

    /// Directory for output files
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Skip repository updates
    #[arg(long)]
    pub skip_update: bool,

    /// Optional YAML file listing the repositories to sync
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Directory to store repositories
    #[arg(long, default_value = "awesome-lists-sources")]
    pub source_dir: PathBuf,

    /// Optional YAML file listing the repositories to sync
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Output JSON file path
    #[arg(long, default_value = "data/awesome-lists.json")]
    pub output: PathBuf,

    /// Directory containing awesome list repositories
    #[arg(long, default_value = "awesome-lists-sources")]
    pub source_dir: PathBuf,

    /// Filter out resources with invalid URLs
    #[arg(long)]
    pub filter_urls: bool,

    /// Show statistics about valid/invalid URLs
    #[arg(long)]
    pub url_stats: bool,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Input JSON file path
    #[arg(long, default_value = "data/awesome-lists.json")]
    pub input: PathBuf,

    /// Output filtered JSON file path
    #[arg(long, default_value = "data/filtered-awesome-lists.json")]
    pub output: PathBuf,

    /// Create a backup of the original file before writing
    #[arg(long)]
    pub backup: bool,

    /// Replace the original file with the filtered version
    #[arg(long)]
    pub replace: bool,
}

impl FilterArgs {
    /// Where the filtered corpus goes: the input itself when replacing.
    pub fn output_path(&self) -> &PathBuf {
        if self.replace { &self.input } else { &self.output }
    }
}
