//! Demo driver for the RTSP server logger.
//!
//! ```text
//! rtsp-logging [config.toml]
//! ```
//!
//! Loads the logging config (defaults when the file is missing), configures
//! the RTSP server component logger, writes a few lines at every severity and
//! shuts down cleanly so everything queued reaches the file.

use rtsp_logging::diagnostics::{self, log};
use rtsp_logging::{
    log_rtsp_debug, log_rtsp_error, log_rtsp_fatal, log_rtsp_warning, rtsp_information, rtsp_trace, ComponentId,
    LoggerConfig, LoggerRegistry, NamedLoggerInitializer,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Diagnostics first, so startup problems are visible on the console
    diagnostics::init_diagnostics();

    let config = match std::env::args_os().nth(1) {
        Some(path) => LoggerConfig::load_or_default(path),
        None => LoggerConfig::default(),
    };

    let registry = LoggerRegistry::global();
    let initializer = NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, config);

    // A logger that cannot write is a startup failure, not something to limp along without
    if let Err(e) = initializer.initialize() {
        log::error!(error = %e, "failed to initialize RTSP server logging");
        return ExitCode::FAILURE;
    }

    let logger = registry.rtsp_server();
    rtsp_information!(logger, "RTSP server logging started, writing to {}", initializer.log_file_path().display());
    rtsp_trace!(logger, "trace output is enabled at threshold {}", logger.level());
    log_rtsp_debug!(registry, "debug build");
    log_rtsp_warning!(registry, "this is what a warning looks like");
    log_rtsp_error!(registry, "this is what an error looks like");
    log_rtsp_fatal!(registry, "this is what a fatal record looks like");

    registry.shutdown();
    ExitCode::SUCCESS
}
