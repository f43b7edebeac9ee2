use super::{Channel, Message, SharedChannel};
use crate::diagnostics::log;
use crate::error::{LoggingError, Result};
use crossbeam_channel::{bounded, unbounded, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

enum Command {
    Log(Message),
    Flush(Sender<()>),
    Shutdown,
}

/// Moves message delivery onto a dedicated worker thread.
///
/// [`log`](Channel::log) only enqueues, so callers never wait on disk I/O.
/// The worker hands messages to the wrapped channel one at a time, in the
/// order they were enqueued. Closing (or dropping) the channel drains whatever
/// is still queued before the worker exits.
pub struct AsyncChannel {
    sender: Sender<Command>,
    worker: Mutex<Option<JoinHandle<()>>>,
    channel: SharedChannel,
}

impl AsyncChannel {
    /// Spawn the worker thread. `name` labels the thread for debuggers and
    /// panic messages.
    pub fn spawn(name: &str, channel: SharedChannel) -> Result<Self> {
        let (sender, receiver) = unbounded::<Command>();
        let downstream = channel.clone();

        let worker = thread::Builder::new()
            .name(format!("{name}-log-writer"))
            .spawn(move || {
                for command in receiver {
                    match command {
                        Command::Log(message) => downstream.log(&message),
                        Command::Flush(ack) => {
                            downstream.flush();
                            let _ = ack.send(());
                        }
                        Command::Shutdown => break,
                    }
                }
                downstream.close();
            })
            .map_err(|source| LoggingError::SpawnWorker {
                logger: name.to_string(),
                source,
            })?;

        Ok(Self {
            sender,
            worker: Mutex::new(Some(worker)),
            channel,
        })
    }

    fn is_running(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Channel for AsyncChannel {
    fn log(&self, message: &Message) {
        // Fails only once the worker is gone; late messages are dropped
        let _ = self.sender.send(Command::Log(message.clone()));
    }

    /// Opens the wrapped channel on the calling thread.
    fn open(&self) -> Result<()> {
        self.channel.open()
    }

    /// Blocks until every message queued so far has been written and the
    /// wrapped channel flushed.
    fn flush(&self) {
        if !self.is_running() {
            return;
        }
        let (ack, done) = bounded(1);
        if self.sender.send(Command::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }

    fn close(&self) {
        let Some(worker) = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };

        let _ = self.sender.send(Command::Shutdown);
        if worker.join().is_err() {
            log::error!("log writer thread panicked; pending messages may be lost");
        }
    }
}

impl Drop for AsyncChannel {
    fn drop(&mut self) {
        self.close();
    }
}
