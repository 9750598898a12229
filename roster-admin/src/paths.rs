//! Platform-specific directory paths and log file rotation.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "roster";
const APPLICATION: &str = "roster-admin";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
pub const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory holding `config.json`.
///
/// - Linux: `$XDG_CONFIG_HOME/roster-admin` or `~/.config/roster-admin`
/// - macOS: `~/Library/Application Support/dev.roster.roster-admin`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Directory holding log files.
///
/// - Linux: `$XDG_CACHE_HOME/roster-admin` or `~/.cache/roster-admin`
/// - macOS: `~/Library/Caches/dev.roster.roster-admin`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Path of the log file written by the current run.
pub fn log_file(log_dir: &Path) -> PathBuf {
    log_dir.join(LATEST_LOG)
}

/// Archive the previous run's log under a timestamped name and prune old
/// archives down to `keep`.
///
/// Call at startup, before the new log file is created.
pub fn rotate_logs(log_dir: &Path, keep: usize) -> io::Result<()> {
    let latest = log_file(log_dir);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        fs::rename(&latest, log_dir.join(format!("{}.log", timestamp)))?;
    }
    prune_logs(log_dir, keep)
}

/// Remove the oldest archived logs beyond `keep`.
fn prune_logs(log_dir: &Path, keep: usize) -> io::Result<()> {
    let mut archived: Vec<_> = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    if archived.len() <= keep {
        return Ok(());
    }

    // Oldest first; names are timestamps, so they break modification-time ties.
    archived.sort_by_key(|entry| {
        (
            entry.metadata().and_then(|m| m.modified()).ok(),
            entry.file_name(),
        )
    });
    let excess = archived.len() - keep;
    for entry in archived.iter().take(excess) {
        log::debug!("removing old log {}", entry.path().display());
        fs::remove_file(entry.path())?;
    }
    Ok(())
}
