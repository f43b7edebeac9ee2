use super::{Channel, Message};
use crate::diagnostics::log;
use crate::severity::Severity;

/// Re-emits messages as `tracing` events, so a component's log lines also
/// show up wherever the process's tracing subscriber writes (usually the
/// console).
///
/// Fatal records map to `ERROR`, there being no higher tracing level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingChannel;

impl TracingChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Channel for TracingChannel {
    fn log(&self, message: &Message) {
        let logger = &*message.source;
        let text = message.text.trim_end_matches('\n');
        match message.severity {
            Severity::Fatal | Severity::Error => log::error!(logger, "{}", text),
            Severity::Warning => log::warn!(logger, "{}", text),
            Severity::Information => log::info!(logger, "{}", text),
            Severity::Debug => log::debug!(logger, "{}", text),
            Severity::Trace => log::trace!(logger, "{}", text),
        }
    }
}
