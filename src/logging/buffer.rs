//! A bounded buffer of log entries that forwards them to the UI in batches.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::Level;

use crate::ui::{LogEntry, UIEvent};

const BATCH_INTERVAL: Duration = Duration::from_millis(100);

/// Pending entries waiting for the next batch.
///
/// When the UI is not draining them, only the newest `max_size` are kept.
pub struct LogBuffer {
    max_size: usize,
    ui_sender: Arc<Mutex<Option<mpsc::UnboundedSender<UIEvent>>>>,
    display_level: Mutex<Level>,
    pending_batch: Arc<Mutex<Vec<LogEntry>>>,
    flushing: Arc<Mutex<bool>>,
}

impl LogBuffer {
    /// Creates a new `LogBuffer` holding at most `max_size` pending entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            ui_sender: Arc::new(Mutex::new(None)),
            display_level: Mutex::new(Level::DEBUG),
            pending_batch: Arc::new(Mutex::new(Vec::new())),
            flushing: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_ui_sender(&self, sender: mpsc::UnboundedSender<UIEvent>) {
        *self.ui_sender.lock().unwrap() = Some(sender);
    }

    /// Stops forwarding entries; the flush task exits on its next tick.
    pub fn clear_ui_sender(&self) {
        *self.ui_sender.lock().unwrap() = None;
    }

    /// Queues an entry for the UI if it passes the display level.
    pub fn add_entry(&self, entry: LogEntry) {
        if entry.level > *self.display_level.lock().unwrap() {
            return;
        }

        {
            let mut pending = self.pending_batch.lock().unwrap();
            if pending.len() >= self.max_size {
                pending.remove(0);
            }
            pending.push(entry);
        }
        self.start_flush_if_needed();
    }

    /// Changes the most verbose level forwarded to the UI.
    pub fn set_display_level(&self, level: Level) {
        let changed = {
            let mut current = self.display_level.lock().unwrap();
            std::mem::replace(&mut *current, level) != level
        };

        if changed {
            if let Some(ref sender) = *self.ui_sender.lock().unwrap() {
                let _ = sender.send(UIEvent::RefreshLogs);
            }
        }
    }

    #[cfg(test)]
    pub fn pending(&self) -> Vec<LogEntry> {
        self.pending_batch.lock().unwrap().clone()
    }

    #[cfg(test)]
    fn is_flushing(&self) -> bool {
        *self.flushing.lock().unwrap()
    }

    /// Spawns the batch flusher unless it is already running.
    ///
    /// Outside a `tokio` runtime entries simply stay pending.
    fn start_flush_if_needed(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        {
            let mut flushing = self.flushing.lock().unwrap();
            if *flushing {
                return;
            }
            *flushing = true;
        }

        let ui_sender = self.ui_sender.clone();
        let pending_batch = self.pending_batch.clone();
        let flushing = self.flushing.clone();

        handle.spawn(async move {
            let mut timer = interval(BATCH_INTERVAL);
            timer.tick().await;

            loop {
                timer.tick().await;

                let Some(sender) = ui_sender.lock().unwrap().clone() else {
                    break;
                };

                let batch: Vec<LogEntry> = pending_batch.lock().unwrap().drain(..).collect();
                if batch.is_empty() {
                    continue;
                }
                if sender.send(UIEvent::NewLogBatch(batch)).is_err() {
                    break;
                }
            }

            *flushing.lock().unwrap() = false;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_pending_entries() {
        let buffer = LogBuffer::new(2);
        for message in ["one", "two", "three"] {
            buffer.add_entry(LogEntry::new(Level::INFO, "test", message));
        }
        buffer.add_entry(LogEntry::new(Level::TRACE, "test", "too verbose"));

        let messages: Vec<_> = buffer.pending().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[tokio::test(start_paused = true)]
    async fn forwards_batches_to_the_ui() {
        let buffer = LogBuffer::new(10);
        let (tx, mut rx) = mpsc::unbounded_channel();
        buffer.set_ui_sender(tx);

        buffer.add_entry(LogEntry::new(Level::INFO, "test", "visible"));
        buffer.add_entry(LogEntry::new(Level::TRACE, "test", "too verbose"));

        match rx.recv().await {
            Some(UIEvent::NewLogBatch(batch)) => {
                let messages: Vec<_> = batch.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(messages, vec!["visible"]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn flusher_stops_once_the_ui_is_gone() {
        let buffer = LogBuffer::new(10);
        let (tx, mut rx) = mpsc::unbounded_channel();
        buffer.set_ui_sender(tx);

        buffer.add_entry(LogEntry::new(Level::INFO, "test", "first"));
        assert!(matches!(rx.recv().await, Some(UIEvent::NewLogBatch(_))));
        assert!(buffer.is_flushing());

        buffer.clear_ui_sender();
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(!buffer.is_flushing());
    }

    #[test]
    fn changing_level_requests_a_refresh() {
        let buffer = LogBuffer::new(10);
        let (tx, mut rx) = mpsc::unbounded_channel();
        buffer.set_ui_sender(tx);

        buffer.set_display_level(Level::DEBUG);
        assert!(rx.try_recv().is_err());

        buffer.set_display_level(Level::WARN);
        assert!(matches!(rx.try_recv(), Ok(UIEvent::RefreshLogs)));
    }
}
