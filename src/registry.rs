//! # Named Loggers
//!
//! A [`LoggerRegistry`] owns every [`NamedLogger`] of a process (or of a test).
//! Loggers are looked up by name; the first lookup creates an unconfigured
//! logger that discards everything until an initializer installs a channel.
//!
//! The registry is an ordinary value passed to whoever needs it. Tests create
//! their own registry, with a manual clock if they need one, and stay
//! independent of each other. [`LoggerRegistry::global`] exists for binaries
//! that prefer a single ambient instance.

use crate::channel::{Message, NullChannel, SharedChannel};
use crate::clock::{SharedClock, SystemClock};
use crate::component::ComponentId;
use crate::constants::UNCONFIGURED_LOG_SEVERITY;
use crate::record::{current_thread_id, CallSite, LogDetails};
use crate::severity::Severity;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// A logger addressed by name, with a severity threshold and a channel.
///
/// Both the threshold and the channel can be swapped while other threads are
/// logging. The threshold check is a single atomic load, so disabled log
/// statements cost next to nothing.
pub struct NamedLogger {
    name: Arc<str>,
    level: AtomicU8,
    channel: RwLock<SharedChannel>,
    clock: SharedClock,
}

impl NamedLogger {
    fn new(name: &str, clock: SharedClock) -> Self {
        Self {
            name: Arc::from(name),
            level: AtomicU8::new(UNCONFIGURED_LOG_SEVERITY.as_u8()),
            channel: RwLock::new(Arc::new(NullChannel)),
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold.
    pub fn level(&self) -> Severity {
        Severity::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(UNCONFIGURED_LOG_SEVERITY)
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Whether a record of `severity` would be delivered.
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.as_u8() <= self.level.load(Ordering::Relaxed)
    }

    pub fn channel(&self) -> SharedChannel {
        self.channel
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install `channel`, returning the one it replaces.
    pub fn set_channel(&self, channel: SharedChannel) -> SharedChannel {
        let mut current = self.channel.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, channel)
    }

    /// Log `text` as-is, if `severity` passes the threshold.
    pub fn log(&self, severity: Severity, text: impl Into<String>) {
        if self.is_enabled(severity) {
            self.emit(severity, text.into());
        }
    }

    /// Log a message decorated with call-site metadata.
    ///
    /// `message` is only called, and the line only rendered, when `severity`
    /// passes the threshold.
    pub fn log_with<F>(&self, severity: Severity, call_site: &CallSite, message: F)
    where
        F: FnOnce() -> String,
    {
        if !self.is_enabled(severity) {
            return;
        }
        let message = message();
        let text = LogDetails::new(&message, call_site, current_thread_id()).to_string();
        self.emit(severity, text);
    }

    fn emit(&self, severity: Severity, text: String) {
        let message = Message {
            source: self.name.clone(),
            severity,
            text,
            timestamp: self.clock.now(),
            thread_id: current_thread_id(),
        };
        self.channel().log(&message);
    }

    pub fn fatal(&self, text: impl Into<String>) {
        self.log(Severity::Fatal, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.log(Severity::Error, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.log(Severity::Warning, text);
    }

    pub fn information(&self, text: impl Into<String>) {
        self.log(Severity::Information, text);
    }

    pub fn debug(&self, text: impl Into<String>) {
        self.log(Severity::Debug, text);
    }

    pub fn trace(&self, text: impl Into<String>) {
        self.log(Severity::Trace, text);
    }

    /// Wait until everything logged so far has reached its destination.
    pub fn flush(&self) {
        self.channel().flush();
    }

    /// Detach the channel chain and close it, flushing pending records. The
    /// logger keeps working afterwards but discards everything.
    pub fn close(&self) {
        let previous = self.set_channel(Arc::new(NullChannel));
        previous.close();
    }
}

impl fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// Process-wide table of named loggers.
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<NamedLogger>>>,
    /// Names an initializer has claimed; see [`LoggerRegistry::claim`].
    configured: Mutex<HashSet<String>>,
    clock: SharedClock,
}

static GLOBAL: Lazy<Arc<LoggerRegistry>> = Lazy::new(|| Arc::new(LoggerRegistry::new()));

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// A registry whose loggers timestamp records with `clock`, and whose
    /// file channels rotate and purge by it.
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            configured: Mutex::new(HashSet::new()),
            clock,
        }
    }

    /// The process-wide registry. Never torn down automatically; call
    /// [`shutdown`](Self::shutdown) before exiting to flush pending records.
    pub fn global() -> Arc<LoggerRegistry> {
        GLOBAL.clone()
    }

    pub fn clock(&self) -> SharedClock {
        self.clock.clone()
    }

    /// The logger called `name`, created unconfigured on first use.
    pub fn get(&self, name: &str) -> Arc<NamedLogger> {
        if let Some(logger) = self.find(name) {
            return logger;
        }
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(NamedLogger::new(name, self.clock.clone())))
            .clone()
    }

    pub fn component(&self, component: ComponentId) -> Arc<NamedLogger> {
        self.get(component.name())
    }

    /// The RTSP server's own logger, `MainServer.RtspServer`.
    pub fn rtsp_server(&self) -> Arc<NamedLogger> {
        self.component(ComponentId::RtspServer)
    }

    /// The logger called `name`, if it was ever looked up.
    pub fn find(&self, name: &str) -> Option<Arc<NamedLogger>> {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Names of all existing loggers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Reserve `name` for configuration. Returns `false` if another
    /// initializer holds or completed the claim.
    pub(crate) fn claim(&self, name: &str) -> bool {
        self.configured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string())
    }

    /// Give up a claim after a failed initialization.
    pub(crate) fn release(&self, name: &str) {
        self.configured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Whether an initializer has configured (or is configuring) `name`.
    pub fn is_configured(&self, name: &str) -> bool {
        self.configured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    /// Close every logger, flushing whatever is still queued.
    pub fn shutdown(&self) {
        let loggers: Vec<Arc<NamedLogger>> = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for logger in loggers {
            logger.close();
        }
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoggerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
