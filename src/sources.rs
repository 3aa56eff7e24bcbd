//! Repository sync through the `git` command line.
//!
//! Each configured remote is checked out as `<source_dir>/<repo-name>`:
//! an existing checkout is updated with `git pull`, a missing one is
//! created with `git clone`. Failures are logged and reported in the
//! returned summary; they never stop the remaining repositories.

use crate::error::{Error, Result};
use itertools::Itertools;
use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info, instrument};

/// Outcome of syncing a batch of repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub synced: usize,
    pub failed: usize,
}

/// Last path segment of a repository URL, used as the checkout directory.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(repo_name("https://github.com/avelino/awesome-go"), "awesome-go");
/// ```
pub fn repo_name(repo_url: &str) -> &str {
    let trimmed = repo_url.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last)
}

/// Clone or pull every repository into `source_dir`.
#[instrument(level = "info", skip_all, fields(source_dir = %source_dir.display(), count = repositories.len()))]
pub async fn sync_all(repositories: &[String], source_dir: &Path) -> SyncSummary {
    let mut summary = SyncSummary::default();
    for repo_url in repositories {
        match sync_repo(repo_url, source_dir).await {
            Ok(()) => summary.synced += 1,
            Err(e) => {
                error!(repo = %repo_url, error = %e, "Repository sync failed");
                summary.failed += 1;
            }
        }
    }
    info!(synced = summary.synced, failed = summary.failed, "Repository sync finished");
    summary
}

/// Make `<source_dir>/<repo-name>` reflect the latest remote state.
///
/// Runs `git pull` inside an existing checkout, or `git clone` in
/// `source_dir` when the checkout is missing.
///
/// # Arguments
///
/// * `repo_url` - Remote repository URL; its last path segment names the checkout
/// * `source_dir` - Directory holding all checkouts
///
/// # Returns
///
/// `Ok(())` once the command succeeded.
///
/// # Errors
///
/// Returns [`Error::Command`] if `git` cannot be started or exits non-zero.
#[instrument(level = "info", skip(source_dir))]
pub async fn sync_repo(repo_url: &str, source_dir: &Path) -> Result<()> {
    let name = repo_name(repo_url);
    let repo_path = source_dir.join(name);

    if fs::try_exists(&repo_path).await.unwrap_or(false) {
        info!(repo = name, "Updating repository");
        run_git(&["pull"], &repo_path).await?;
    } else {
        info!(repo = %repo_url, "Cloning repository");
        run_git(&["clone", repo_url], source_dir).await?;
    }
    Ok(())
}

/// Run `git <args>` in `cwd`, logging its stdout.
async fn run_git(args: &[&str], cwd: &Path) -> Result<()> {
    let command = format!("git {}", args.iter().join(" "));
    info!(%command, cwd = %cwd.display(), "Running command");

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| Error::Command {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!(%command, status = %output.status, %stderr, "Command failed");
        return Err(Error::Command { command, stderr });
    }

    info!(
        %command,
        stdout = %String::from_utf8_lossy(&output.stdout).trim(),
        "Command output"
    );
    Ok(())
}
