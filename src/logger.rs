//! File logging for the TUI.
//!
//! The terminal is owned by the UI while the app runs, so log records go to a
//! file through `fern` instead of stdout/stderr. Code everywhere else only
//! uses the `log` macros.

use crate::config::LoggingConfig;
use crate::constants::APP_NAME;
use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Parse a level name from the config file
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Location of the log file
pub fn get_log_file_path() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::cache_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(base.join(APP_NAME).join(format!("{APP_NAME}.log")))
}

/// Install the global logger according to the config.
///
/// Returns the log file path when logging is enabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        log::set_max_level(LevelFilter::Off);
        return Ok(None);
    }

    let level = parse_level(&config.level).unwrap_or(LevelFilter::Info);
    let path = get_log_file_path()?;
    init_with_path(level, &path)?;
    Ok(Some(path))
}

/// Install the global logger writing to `path`
pub fn init_with_path(level: LevelFilter, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // Keep HTTP internals out of the app log unless tracing is requested
        .level_for("reqwest", level.min(LevelFilter::Warn))
        .level_for("hyper", level.min(LevelFilter::Warn))
        .chain(file)
        .apply()
        .context("Failed to install logger")?;

    Ok(())
}
