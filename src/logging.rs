//! Tracing setup
//!
//! The interactive form owns stdout and the alternate screen, so it logs to
//! a file. The one-shot subcommands log to stderr. Nothing is installed when
//! the level is `off`.

use crate::config;
use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Build the filter for a level, or `None` when logging is off
pub fn level_filter(level: &str) -> Result<Option<EnvFilter>> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    Ok(Some(filter))
}

/// Open the log file for appending, creating parent directories
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create log directory '{}'", parent.display())
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))
}

/// Log to the configured file. Used by the interactive form.
pub fn init_file_logging() -> Result<()> {
    let Some(filter) = level_filter(&config::get_log_level())? else {
        return Ok(());
    };
    let log_file = open_log_file(Path::new(&config::get_log_file_path()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Log to stderr. Used by the one-shot subcommands.
pub fn init_stderr_logging() -> Result<()> {
    let Some(filter) = level_filter(&config::get_log_level())? else {
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
