//! Configuration constants and utilities for apiterm
//!
//! Logging is configured through environment variables only; the interactive
//! form itself has nothing to configure.

/// Environment variable selecting the log level
pub const LOG_LEVEL_ENV_VAR: &str = "APITERM_LOG_LEVEL";

/// Environment variable overriding the log file location
pub const LOG_FILE_ENV_VAR: &str = "APITERM_LOG_FILE";

/// Logging is off unless asked for, since the UI owns the terminal
pub const DEFAULT_LOG_LEVEL: &str = "off";

/// Default log file path for apiterm
pub const DEFAULT_LOG_FILE_PATH: &str = "~/.apiterm/apiterm.log";

/// Levels accepted in `APITERM_LOG_LEVEL`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

fn env_string(name: &str) -> Option<String> {
    std::env::var_os(name)
        .and_then(|val| val.into_string().ok())
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Get the log level, checking the environment variable first. Unknown
/// values fall back to the default.
pub fn get_log_level() -> String {
    match env_string(LOG_LEVEL_ENV_VAR).map(|val| val.to_lowercase()) {
        Some(level) if LOG_LEVELS.contains(&level.as_str()) => level,
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}

/// Get the log file path with `~` and environment variables expanded
pub fn get_log_file_path() -> String {
    let raw = env_string(LOG_FILE_ENV_VAR).unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string());
    shellexpand::full(&raw)
        .map(|expanded| expanded.into_owned())
        .unwrap_or(raw)
}
