//! # Diagnostics
//!
//! Component loggers write to their own files. This module covers the crate's
//! *own* operational messages: rotations, purged archives, write failures and
//! initialization results. Those go through the `tracing` ecosystem, like the
//! rest of the server's diagnostics.
//!
//! ## Environment Configuration
//!
//! Set the `RUST_LOG` environment variable to control diagnostic output:
//! - `RUST_LOG=rtsp_logging=debug` - Include rotation and purge events
//! - `RUST_LOG=warn` - Only write failures and configuration warnings
//!
//! Library users who already install their own subscriber do not need to call
//! [`init_diagnostics`]; the events are picked up by whatever is installed.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a console subscriber for diagnostics.
///
/// The subscriber is installed at most once per process; later calls are
/// ignored. When another global subscriber is already in place, that one is
/// kept.
pub fn init_diagnostics() {
    static INIT: Lazy<()> = Lazy::new(|| {
        // RUST_LOG wins; otherwise informational output from this crate only
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rtsp_logging=info,warn"));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(true)
                    .with_level(true),
            )
            .try_init();
    });

    Lazy::force(&INIT);
}

/// Tracing macros used for diagnostics throughout the crate.
///
/// ```rust
/// use rtsp_logging::diagnostics::log;
///
/// log::info!(logger = "MainServer.RtspServer", "component logger configured");
/// log::warn!("log directory {} is not writable", "/var/log/rtsp");
/// ```
pub mod log {
    pub use tracing::{debug, error, info, trace, warn};
}
