//! # Channels
//!
//! A channel is a destination for log messages. Channels nest: the chain built
//! for a component logger looks like this:
//!
//! ```text
//! NamedLogger ──► AsyncChannel ──► SplitterChannel ──► FormattingChannel ──► FileChannel
//!   (caller)       (queue)          (worker thread)     (pattern)             (rotate/write)
//!                                          └──────────► TracingChannel (optional)
//! ```
//!
//! Channels never return errors from [`Channel::log`]. A sink that cannot
//! write reports the failure through `tracing` and drops the message.

mod async_channel;
mod file;
mod formatting;
mod splitter;
mod tracing_forward;

pub use async_channel::AsyncChannel;
pub use file::{FileChannel, FileChannelBuilder};
pub use formatting::{FormattingChannel, PatternFormatter};
pub use splitter::SplitterChannel;
pub use tracing_forward::TracingChannel;

use crate::error::Result;
use crate::severity::Severity;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// A log message on its way through a channel chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Name of the logger that produced the message.
    pub source: Arc<str>,
    pub severity: Severity,
    pub text: String,
    /// Local time at which the message was logged.
    pub timestamp: DateTime<Local>,
    pub thread_id: u64,
}

/// A destination for log messages.
pub trait Channel: Send + Sync {
    fn log(&self, message: &Message);

    /// Acquire underlying resources ahead of the first message.
    fn open(&self) -> Result<()> {
        Ok(())
    }

    /// Push buffered output to its destination.
    fn flush(&self) {}

    /// Flush and release underlying resources.
    fn close(&self) {}
}

/// Shared handle to a channel.
pub type SharedChannel = Arc<dyn Channel>;

/// Discards everything. Unconfigured loggers start out with this channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullChannel;

impl Channel for NullChannel {
    fn log(&self, _message: &Message) {}
}
