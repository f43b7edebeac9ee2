//! # Severity Macros
//!
//! One macro per severity. Each takes a logger (anything that derefs to a
//! [`NamedLogger`](crate::registry::NamedLogger)) and `format!` arguments:
//!
//! ```rust
//! use rtsp_logging::{rtsp_information, rtsp_warning, LoggerRegistry};
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.get("MainServer.RtspServer");
//! let session = 42;
//! rtsp_information!(logger, "session {} opened", session);
//! rtsp_warning!(logger, "client {session} sent an unknown header");
//! ```
//!
//! The threshold is checked before anything else happens. For a filtered
//! severity the format arguments are never evaluated and no line is built.
//! `rtsp_debug!` disappears entirely from builds without `debug_assertions`.

/// Log at an explicit [`Severity`](crate::Severity) with call-site metadata.
#[macro_export]
macro_rules! rtsp_log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log_with($severity, &$crate::call_site!(), || ::std::format!($($arg)+))
    };
}

#[macro_export]
macro_rules! rtsp_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::rtsp_log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

#[macro_export]
macro_rules! rtsp_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::rtsp_log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! rtsp_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::rtsp_log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! rtsp_information {
    ($logger:expr, $($arg:tt)+) => {
        $crate::rtsp_log!($logger, $crate::Severity::Information, $($arg)+)
    };
}

#[macro_export]
macro_rules! rtsp_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::rtsp_log!($logger, $crate::Severity::Trace, $($arg)+)
    };
}

/// Debug-level logging, compiled only into builds with `debug_assertions`.
#[macro_export]
macro_rules! rtsp_debug {
    ($logger:expr, $($arg:tt)+) => {{
        #[cfg(debug_assertions)]
        {
            $crate::rtsp_log!($logger, $crate::Severity::Debug, $($arg)+);
        }
        #[cfg(not(debug_assertions))]
        {
            let _ = &$logger;
        }
    }};
}

/// RTSP server shorthand: `log_rtsp_information!(registry, ...)` logs through
/// [`LoggerRegistry::rtsp_server`](crate::LoggerRegistry::rtsp_server).
///
/// ```rust
/// use rtsp_logging::{log_rtsp_warning, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// log_rtsp_warning!(registry, "RTCP timeout for session {}", 9);
/// ```
#[macro_export]
macro_rules! log_rtsp_fatal {
    ($registry:expr, $($arg:tt)+) => {
        $crate::rtsp_fatal!($registry.rtsp_server(), $($arg)+)
    };
}

#[macro_export]
macro_rules! log_rtsp_error {
    ($registry:expr, $($arg:tt)+) => {
        $crate::rtsp_error!($registry.rtsp_server(), $($arg)+)
    };
}

#[macro_export]
macro_rules! log_rtsp_warning {
    ($registry:expr, $($arg:tt)+) => {
        $crate::rtsp_warning!($registry.rtsp_server(), $($arg)+)
    };
}

#[macro_export]
macro_rules! log_rtsp_information {
    ($registry:expr, $($arg:tt)+) => {
        $crate::rtsp_information!($registry.rtsp_server(), $($arg)+)
    };
}

#[macro_export]
macro_rules! log_rtsp_trace {
    ($registry:expr, $($arg:tt)+) => {
        $crate::rtsp_trace!($registry.rtsp_server(), $($arg)+)
    };
}

#[macro_export]
macro_rules! log_rtsp_debug {
    ($registry:expr, $($arg:tt)+) => {
        $crate::rtsp_debug!($registry.rtsp_server(), $($arg)+)
    };
}
