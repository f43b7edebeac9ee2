//! # Logger Configuration
//!
//! [`LoggerConfig`] carries the knobs of one component logger. It can be built
//! in code or read from a TOML file:
//!
//! ```toml
//! log_directory = "/var/log/rtsp"
//! rotate_on_open = true
//! flush_immediately = false
//! min_severity = "Information"
//! retention_days = 14
//! forward_to_tracing = false
//! ```
//!
//! Every field is optional in the file; missing ones take the defaults below.
//!
//! ## Default Log Location
//!
//! - **Windows**: `%LOCALAPPDATA%\rtsp-server\logs`
//! - **macOS**: `~/Library/Application Support/rtsp-server/logs`
//! - **Linux**: `~/.local/share/rtsp-server/logs`
//!
//! If the platform data directory cannot be determined, `./logs` is used.

use crate::constants::{DEFAULT_LOG_SEVERITY, DEFAULT_LOG_SUBDIR, DEFAULT_NUM_LOG_DAYS, FALLBACK_LOG_DIR};
use crate::diagnostics::log;
use crate::error::{LoggingError, Result};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one component logger.
///
/// The initializer takes its own copy, so a config cannot change underneath a
/// running logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory that holds `<component>.log` and its archives. Must not be empty.
    pub log_directory: PathBuf,

    /// Archive an existing log file at startup, so each run starts a fresh file
    pub rotate_on_open: bool,

    /// Flush after every line instead of when the write buffer fills
    pub flush_immediately: bool,

    /// Least severe level that still gets written
    pub min_severity: Severity,

    /// Archived files older than this many days are deleted on rotation
    pub retention_days: u32,

    /// Also re-emit every line as a `tracing` event
    pub forward_to_tracing: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_directory: default_log_directory(),
            rotate_on_open: false,
            flush_immediately: false,
            min_severity: DEFAULT_LOG_SEVERITY,
            retention_days: DEFAULT_NUM_LOG_DAYS,
            forward_to_tracing: false,
        }
    }
}

impl LoggerConfig {
    /// Defaults, writing into `log_directory`.
    pub fn new(log_directory: impl Into<PathBuf>) -> Self {
        Self {
            log_directory: log_directory.into(),
            ..Self::default()
        }
    }

    pub fn with_rotate_on_open(mut self, rotate: bool) -> Self {
        self.rotate_on_open = rotate;
        self
    }

    pub fn with_flush_immediately(mut self, flush: bool) -> Self {
        self.flush_immediately = flush;
        self
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    pub fn with_forward_to_tracing(mut self, forward: bool) -> Self {
        self.forward_to_tracing = forward;
        self
    }

    /// Check the preconditions the initializer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.log_directory.as_os_str().is_empty() {
            return Err(LoggingError::EmptyLogDirectory);
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read a config file, failing on any I/O or parse error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoggingError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Read a config file, falling back to defaults when it is missing or
    /// unreadable. Logging setup should never be the reason a server refuses
    /// to start because of a typo in its config file.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(error = %e, "using default logging config");
                Self::default()
            }
        }
    }

    /// Write the config as pretty TOML, creating parent directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_error = |source| LoggingError::WriteConfig {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, self.to_toml_string()?).map_err(write_error)?;
        Ok(())
    }
}

/// Platform data directory joined with `rtsp-server/logs`, or `./logs`.
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(DEFAULT_LOG_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_LOG_DIR))
}
