//! File logging. The terminal belongs to the TUI, so nothing is logged to it.

use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already installed: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Install a `WriteLogger` appending to `path`, creating its parent directory.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    simplelog::WriteLogger::init(level, config, file)?;
    log::info!("range-trainer {} logging at {level}", crate::VERSION);
    Ok(())
}
