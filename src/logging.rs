//! File logging for the terminal UI.
//!
//! The alternate screen owns stdout and stderr while the game runs, so log
//! records go to a file instead.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Create (or truncate) the log file, making parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))
}

/// Install the global logger writing to `path`
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = open_log_file(path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file).context("Failed to initialize logger")
}
