//! File logging. The terminal belongs to the UI, so events go to
//! `chainview.log` next to the config file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "chainview.log";
const DEFAULT_DIRECTIVES: &str = "chainview=info";

/// Builds the filter from an explicit level, then `RUST_LOG`, then the default.
pub fn filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directives) => {
            EnvFilter::try_new(directives).with_context(|| format!("Invalid log filter {directives:?}"))
        }
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))),
    }
}

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(dir: &Path, level: Option<&str>) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {dir:?}"))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
