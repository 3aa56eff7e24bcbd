//! # awesome_lists
//!
//! Scrapes a fixed set of curated "awesome list" repositories and converts
//! each README into structured JSON: categories of resources with a name,
//! URL, description and tags.
//!
//! ## Usage
//!
//! ```sh
//! awesome_lists run --source-dir awesome-lists-sources --output-dir data
//! ```
//!
//! ## Architecture
//!
//! The `run` command follows a pipeline:
//! 1. **Sync**: Clone or pull every configured repository with `git`
//! 2. **Extraction**: Render each README and split it into categories
//! 3. **Filtering**: Drop resources whose URL is not an absolute HTTP(S) URL
//! 4. **Output**: Write the corpus JSON and bump the run metadata
//!
//! `sync`, `extract` and `filter` run the individual steps on their own.

use clap::Parser;
use std::error::Error;
use std::time::Instant;
use tracing::{error, info, warn};

mod cli;
mod collector;
mod config;
mod error;
mod logging;
mod models;
mod outputs;
mod parsers;
mod sources;
mod utils;
mod validate;

use cli::{Cli, Command, ExtractArgs, FilterArgs, RunArgs, SyncArgs};
use collector::{collect, filter_with_report, CollectOptions};
use models::UrlStats;
use outputs::{json, metadata};
use utils::ensure_writable_dir;

/// File name of the corpus inside the output directory.
const CORPUS_FILE: &str = "awesome-lists.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let _log_guard = logging::init(&args.log_dir, args.command.log_name())?;

    let start_time = Instant::now();
    info!(command = args.command.log_name(), "awesome_lists starting up");

    let result = match args.command {
        Command::Run(run_args) => run(run_args).await,
        Command::Sync(sync_args) => sync(sync_args).await,
        Command::Extract(extract_args) => extract(extract_args).await,
        Command::Filter(filter_args) => filter(filter_args).await,
    };

    let elapsed = start_time.elapsed();
    match result {
        Ok(()) => {
            info!(
                ?elapsed,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Execution complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Execution failed");
            Err(e)
        }
    }
}

/// Full pipeline: sync, extract with filtering and statistics, update metadata.
async fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();

    // Early check: the output dir must be writable before any slow work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    if args.skip_update {
        info!("Skipping repository updates as requested");
    } else {
        info!("Updating repositories...");
        sync(SyncArgs {
            source_dir: args.source_dir.clone(),
            config: args.config,
        })
        .await?;
    }

    info!("Running extraction with URL filtering...");
    let output = args.output_dir.join(CORPUS_FILE);
    extract(ExtractArgs {
        output: output.clone(),
        source_dir: args.source_dir,
        filter_urls: true,
        url_stats: true,
    })
    .await?;

    let run_metadata = metadata::update_metadata(&args.output_dir).await?;

    let elapsed = start_time.elapsed().as_secs_f64();
    info!(elapsed_secs = elapsed, "Main process completed successfully");
    println!("\nProcess completed successfully in {elapsed:.2} seconds");
    println!("Data saved to {}", output.display());
    println!(
        "Metadata updated at {} (update #{})",
        args.output_dir.join(metadata::METADATA_FILE).display(),
        run_metadata.update_count
    );
    Ok(())
}

/// Clone or pull every configured repository. Per-repository failures are
/// logged and do not fail the command.
async fn sync(args: SyncArgs) -> Result<(), Box<dyn Error>> {
    let config = config::load_config(args.config.as_deref()).await?;
    ensure_writable_dir(&args.source_dir).await?;

    let summary = sources::sync_all(&config.repositories, &args.source_dir).await;
    if summary.failed > 0 {
        warn!(failed = summary.failed, "Some repositories could not be synced");
    }
    Ok(())
}

/// Parse every checkout and write the corpus.
async fn extract(args: ExtractArgs) -> Result<(), Box<dyn Error>> {
    let options = CollectOptions {
        filter_urls: args.filter_urls,
        url_stats: args.url_stats,
    };
    let collection = collect(&args.source_dir, options).await?;

    json::write_corpus(&args.output, &collection.corpus).await?;
    info!(
        lists = collection.corpus.len(),
        path = %args.output.display(),
        "Processed awesome lists; data saved"
    );

    if let Some(stats) = collection.stats {
        print_url_stats(&stats);
        if args.filter_urls {
            println!("\nFiltered data saved to {}", args.output.display());
            println!("Removed {} resources with invalid URLs", stats.invalid);
        }
    }
    Ok(())
}

/// Filter an existing corpus file, optionally replacing it with a backup.
async fn filter(args: FilterArgs) -> Result<(), Box<dyn Error>> {
    let corpus = json::read_corpus(&args.input).await?;

    if args.backup || args.replace {
        match json::write_backup(&args.input, &corpus).await {
            Ok(path) => println!("Backup created at {}", path.display()),
            Err(e) => {
                warn!(error = %e, "Error creating backup");
                println!("Warning: Failed to create backup: {e}");
            }
        }
    }

    let (filtered, report) = filter_with_report(corpus);
    let output = args.output_path();
    json::write_corpus(output, &filtered).await?;

    info!(
        removed = report.removed_resources,
        total = report.total_resources,
        "Filtering complete"
    );
    println!("\nURL Filtering Complete:");
    println!("Total resources processed: {}", report.total_resources);
    println!(
        "Resources removed: {} ({}%)",
        report.removed_resources, report.percentage_removed
    );
    println!("Filtered data saved to: {}", output.display());
    if args.replace {
        println!("Original file has been replaced with filtered data.");
    }
    Ok(())
}

fn print_url_stats(stats: &UrlStats) {
    println!("\nURL Statistics:");
    println!("Total resources: {}", stats.total);
    println!("Valid URLs: {} ({:.1}%)", stats.valid, stats.valid_percent);
    println!("Invalid URLs: {} ({:.1}%)", stats.invalid, stats.invalid_percent);
}
