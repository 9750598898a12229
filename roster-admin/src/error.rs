//! Application errors

use std::path::PathBuf;

/// Errors surfaced by the command line front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid config file {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Api(#[from] roster_lib::error::Error),

    #[error(transparent)]
    Table(#[from] roster_table::TableError),

    #[error("Unknown group: {0}")]
    UnknownGroup(i64),
}
