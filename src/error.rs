//! # Error Types
//!
//! Every fallible operation in this crate returns [`LoggingError`]. Errors only
//! surface at startup (configuration, directory creation, opening the first log
//! file, spawning the writer thread). Failures while a logger is running are
//! reported through `tracing` diagnostics and the record is dropped, so a full
//! disk never takes down the calling thread.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or starting a component logger.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured log directory was an empty path.
    #[error("log directory must not be empty")]
    EmptyLogDirectory,

    /// The log directory did not exist and could not be created.
    #[error("failed to create log directory {path:?}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path:?}: {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log file {path:?}: {source}")]
    WriteLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Renaming the active log file to its archive name failed.
    #[error("failed to archive log file {path:?}: {source}")]
    ArchiveLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn log writer thread for `{logger}`: {source}")]
    SpawnWorker {
        logger: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {path:?}: {source}")]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid logging config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("failed to serialize logging config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    #[error("unknown severity `{0}`")]
    UnknownSeverity(String),

    #[error("unknown component `{0}`")]
    UnknownComponent(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LoggingError>;
