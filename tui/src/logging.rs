//! File logging for the terminal front end.
//!
//! The alternate screen owns stdout and stderr, so all `tracing` output goes
//! to a file through a non-blocking writer. `RUST_LOG` wins over `-v`.

use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,catalog_core=info,catalog_tui=info",
        1 => "info,catalog_client=debug,catalog_core=debug,catalog_tui=debug",
        _ => "debug,catalog_client=trace,catalog_core=trace,catalog_tui=trace",
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub(crate) fn init(verbose: u8, path: &Path) -> Result<WorkerGuard> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}
