//! File logging setup.

use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::AppError;
use crate::paths;

/// Initialize the global logger writing to `latest.log` in `log_dir`.
///
/// The previous run's log is archived first. Returns the log file path.
pub fn init_in(log_dir: &Path, level: LevelFilter) -> Result<PathBuf, AppError> {
    fs::create_dir_all(log_dir)?;
    paths::rotate_logs(log_dir, paths::MAX_OLD_LOGS)?;

    let path = paths::log_file(log_dir);
    let file = File::create(&path)?;
    let config = ConfigBuilder::new()
        .add_filter_allow_str("roster")
        .build();
    WriteLogger::init(level, config, file)?;
    Ok(path)
}

/// Initialize logging in the platform cache directory.
///
/// Returns `Ok(None)` when no home directory can be determined; the run
/// then continues without a log file.
pub fn init(level: LevelFilter) -> Result<Option<PathBuf>, AppError> {
    match paths::cache_dir() {
        Some(dir) => init_in(&dir, level).map(Some),
        None => Ok(None),
    }
}
