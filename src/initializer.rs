//! # Component Logger Initialization
//!
//! [`NamedLoggerInitializer`] wires a component's named logger to its log
//! file exactly once:
//!
//! 1. Make sure the log directory exists
//! 2. Build `<dir>/<component>.log` with daily rotation, timestamped archives
//!    and age-based purging
//! 3. Format every line as `YYYY-MM-DD HH:MM:SS <Severity>\t\t<text>`
//! 4. Put a fan-out channel in front, for extra destinations later
//! 5. Deliver asynchronously so callers never wait on the disk
//! 6. Set the threshold and install the chain on the named logger
//!
//! ## Idempotency
//!
//! A second `initialize` call on the same initializer does nothing. The
//! registry also remembers which names have been configured, so a second
//! initializer aimed at an already configured component does nothing either,
//! apart from a warning: two initializers for one component usually means two
//! parts of the server each think they own its logging. Such an initializer
//! stays uninitialized, so calling it again after the other one failed and
//! released the name configures the logger after all.

use crate::channel::{
    AsyncChannel, Channel, FileChannel, FormattingChannel, PatternFormatter, SplitterChannel,
    TracingChannel,
};
use crate::component::ComponentId;
use crate::config::LoggerConfig;
use crate::constants::{LINE_PATTERN, LOG_FILE_EXTENSION};
use crate::diagnostics::log;
use crate::error::{LoggingError, Result};
use crate::fs::{DirectoryCreator, OsDirectories};
use crate::registry::{LoggerRegistry, NamedLogger};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// What a call to [`NamedLoggerInitializer::initialize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initialization {
    /// The logger was configured by this call.
    Configured,
    /// This initializer had already run; nothing changed.
    AlreadyInitialized,
    /// Another initializer had already claimed the same logger name;
    /// nothing changed. A later call may still configure the logger if that
    /// initializer fails.
    ConfiguredElsewhere,
}

/// Configures one component's named logger.
pub struct NamedLoggerInitializer {
    registry: Arc<LoggerRegistry>,
    name: String,
    config: LoggerConfig,
    directories: Arc<dyn DirectoryCreator>,
    initialized: Mutex<bool>,
}

impl NamedLoggerInitializer {
    pub fn new(registry: Arc<LoggerRegistry>, component_name: impl Into<String>, config: LoggerConfig) -> Self {
        Self {
            registry,
            name: component_name.into(),
            config,
            directories: Arc::new(OsDirectories),
            initialized: Mutex::new(false),
        }
    }

    pub fn for_component(registry: Arc<LoggerRegistry>, component: ComponentId, config: LoggerConfig) -> Self {
        Self::new(registry, component.name(), config)
    }

    /// Replace the directory creator, e.g. with one that fails on purpose.
    pub fn with_directories(mut self, directories: Arc<dyn DirectoryCreator>) -> Self {
        self.directories = directories;
        self
    }

    pub fn component_name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// `<log directory>/<component>.log`
    pub fn log_file_path(&self) -> PathBuf {
        self.config
            .log_directory
            .join(format!("{}.{}", self.name, LOG_FILE_EXTENSION))
    }

    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The named logger this initializer configures.
    pub fn logger(&self) -> Arc<NamedLogger> {
        self.registry.get(&self.name)
    }

    /// Configure the logger, once.
    ///
    /// Fails when the config is invalid, the directory cannot be created, the
    /// log file cannot be rotated/opened on startup, or the writer thread
    /// cannot be spawned. On failure the logger is left as it was and a later
    /// call may try again.
    pub fn initialize(&self) -> Result<Initialization> {
        let mut initialized = self.initialized.lock().unwrap_or_else(PoisonError::into_inner);
        if *initialized {
            return Ok(Initialization::AlreadyInitialized);
        }

        self.config.validate()?;

        if !self.registry.claim(&self.name) {
            log::warn!(
                logger = %self.name,
                "logger already configured by another initializer; keeping the existing setup"
            );
            // Left unset: the other initializer may still fail and release the name
            return Ok(Initialization::ConfiguredElsewhere);
        }

        match self.install() {
            Ok(()) => {
                *initialized = true;
                log::info!(
                    logger = %self.name,
                    file = %self.log_file_path().display(),
                    level = %self.config.min_severity,
                    retention_days = self.config.retention_days,
                    "component logger configured"
                );
                Ok(Initialization::Configured)
            }
            Err(e) => {
                self.registry.release(&self.name);
                Err(e)
            }
        }
    }

    fn install(&self) -> Result<()> {
        let directory = &self.config.log_directory;
        self.directories
            .ensure_dir(directory)
            .map_err(|source| LoggingError::CreateDirectory {
                path: directory.clone(),
                source,
            })?;

        let file = Arc::new(
            FileChannel::builder(self.log_file_path())
                .flush_immediately(self.config.flush_immediately)
                .purge_after_days(self.config.retention_days)
                .rotate_on_open(self.config.rotate_on_open)
                .clock(self.registry.clock())
                .build(),
        );

        let formatting = FormattingChannel::new(PatternFormatter::new(LINE_PATTERN), file.clone());

        let splitter = SplitterChannel::new();
        splitter.add_channel(Arc::new(formatting));
        if self.config.forward_to_tracing {
            splitter.add_channel(Arc::new(TracingChannel::new()));
        }

        let delivery = AsyncChannel::spawn(&self.name, Arc::new(splitter))?;

        // Rotate the previous run's file before anything can be written to it
        if self.config.rotate_on_open {
            file.open()?;
        }

        let logger = self.registry.get(&self.name);
        logger.set_level(self.config.min_severity);
        let previous = logger.set_channel(Arc::new(delivery));
        previous.close();
        Ok(())
    }
}
