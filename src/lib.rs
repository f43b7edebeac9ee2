//! # RTSP Server Logging
//!
//! Per-component log files for the RTSP server. Each component gets a named
//! logger writing to `<log dir>/<component>.log`, rotated daily, with old
//! archives purged after a configurable number of days. Writes happen on a
//! background thread, so logging never blocks on the disk.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌────────────────────────┐
//! │ rtsp_* macros    │   │ LoggerRegistry   │   │ NamedLoggerInitializer │
//! │                  │   │                  │   │                        │
//! │ • threshold check│──►│ • NamedLogger    │◄──│ • directory check      │
//! │ • call-site info │   │   per component  │   │ • channel chain        │
//! └──────────────────┘   └────────┬─────────┘   └────────────────────────┘
//!                                 │
//!                        ┌────────▼─────────┐
//!                        │ Channel chain    │
//!                        │                  │
//!                        │ • Async worker   │
//!                        │ • Splitter       │
//!                        │ • Pattern format │
//!                        │ • Rotating file  │
//!                        └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rtsp_logging::{rtsp_error, rtsp_information, ComponentId, LoggerConfig, LoggerRegistry, NamedLoggerInitializer};
//!
//! # fn main() -> Result<(), rtsp_logging::LoggingError> {
//! let registry = Arc::new(LoggerRegistry::new());
//! let config = LoggerConfig::new("./logs").with_rotate_on_open(true);
//! NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, config).initialize()?;
//!
//! let logger = registry.component(ComponentId::RtspServer);
//! rtsp_information!(logger, "listening on port {}", 8554);
//! rtsp_error!(logger, "client {} timed out", "10.0.0.7");
//!
//! registry.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! Every line on disk has the form
//!
//! ```text
//! 2024-06-01 12:00:00 Information\t\tserver.rs\t57\tstart\tTID: 3\tlistening on port 8554
//! ```

pub mod channel;
pub mod clock;
pub mod component;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod fs;
pub mod initializer;
mod macros;
pub mod record;
pub mod registry;
pub mod severity;

pub use clock::{Clock, ManualClock, SystemClock};
pub use component::ComponentId;
pub use config::LoggerConfig;
pub use error::{LoggingError, Result};
pub use initializer::{Initialization, NamedLoggerInitializer};
pub use record::{render, CallSite, LogDetails};
pub use registry::{LoggerRegistry, NamedLogger};
pub use severity::Severity;
