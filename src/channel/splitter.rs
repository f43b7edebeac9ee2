use super::{Channel, Message, SharedChannel};
use crate::error::Result;
use std::sync::{PoisonError, RwLock};

/// Fans every message out to a list of channels, in insertion order.
///
/// Component loggers start with a single formatted file channel in here; a
/// console or forwarding channel can be added later without touching any call
/// site.
#[derive(Default)]
pub struct SplitterChannel {
    channels: RwLock<Vec<SharedChannel>>,
}

impl SplitterChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_channel(&self, channel: SharedChannel) {
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(channel);
    }

    pub fn len(&self) -> usize {
        self.channels.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn each(&self, mut f: impl FnMut(&SharedChannel)) {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        channels.iter().for_each(|channel| f(channel));
    }
}

impl Channel for SplitterChannel {
    fn log(&self, message: &Message) {
        self.each(|channel| channel.log(message));
    }

    /// Opens every channel; the first failure is returned after all were tried.
    fn open(&self) -> Result<()> {
        let mut first_error = None;
        self.each(|channel| {
            if let Err(e) = channel.open() {
                first_error.get_or_insert(e);
            }
        });
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&self) {
        self.each(|channel| channel.flush());
    }

    fn close(&self) {
        self.each(|channel| channel.close());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use chrono::Local;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl Channel for Recording {
        fn log(&self, message: &Message) {
            self.0.lock().unwrap().push(message.text.clone());
        }
    }

    #[test]
    fn forwards_to_every_channel() {
        let first = Arc::new(Recording::default());
        let second = Arc::new(Recording::default());
        let splitter = SplitterChannel::new();
        assert!(splitter.is_empty());

        splitter.add_channel(first.clone());
        splitter.add_channel(second.clone());
        assert_eq!(splitter.len(), 2);

        splitter.log(&Message {
            source: "test".into(),
            severity: Severity::Information,
            text: "fan out".to_string(),
            timestamp: Local::now(),
            thread_id: 1,
        });

        assert_eq!(*first.0.lock().unwrap(), vec!["fan out"]);
        assert_eq!(*second.0.lock().unwrap(), vec!["fan out"]);
    }
}
