//! Tracing setup for one command invocation.
//!
//! Events go to stderr and are appended, without ANSI colors, to
//! `<log_dir>/<name>.log`. The subscriber is installed as the default for
//! the current thread only and is removed when the returned guard drops.

use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Build the run's logging sink and make it the default until the guard drops.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Fails if the log directory cannot be created or the log file cannot be
/// opened for appending.
pub fn init(log_dir: &Path, name: &str) -> Result<DefaultGuard> {
    fs::create_dir_all(log_dir).map_err(|e| Error::io(log_dir, e))?;
    let log_path = log_dir.join(format!("{name}.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| Error::io(&log_path, e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tfmt::layer()
                .with_target(true)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .with(
            tfmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(Mutex::new(file)),
        );

    Ok(tracing::subscriber::set_default(subscriber))
}
