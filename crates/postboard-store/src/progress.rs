use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::warn;

/// One upload progress notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Percentage in `[0, 100]`. Never decreases within one upload, and is
    /// exactly 100 only once the blob is committed.
    pub percent: u8,
    pub bytes_written: u64,
    pub total_bytes: u64,
}

/// Receives upload progress.
///
/// Observers run on whatever thread drives the upload and must return
/// quickly. An observer that panics is isolated and dropped from the
/// upload; it never aborts the upload itself.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Observer that forwards events into a tokio broadcast channel.
///
/// Sending never blocks: a lagging receiver loses the oldest events, and
/// having no receivers at all is fine.
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    sender: broadcast::Sender<ProgressEvent>,
}

impl ChannelObserver {
    /// Create an observer and its first receiver.
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<ProgressEvent>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, event: ProgressEvent) {
        // No receivers is not an error for an advisory channel.
        let _ = self.sender.send(event);
    }
}

/// Per-upload fan-out to the registered observers.
pub(crate) struct ProgressFanout {
    observers: Vec<Option<Arc<dyn ProgressObserver>>>,
    total_bytes: u64,
    last_percent: Option<u8>,
}

impl ProgressFanout {
    pub(crate) fn new(observers: Vec<Arc<dyn ProgressObserver>>, total_bytes: u64) -> Self {
        Self {
            observers: observers.into_iter().map(Some).collect(),
            total_bytes,
            last_percent: None,
        }
    }

    /// Report staged bytes. Capped at 99 until [`ProgressFanout::finish`].
    pub(crate) fn report(&mut self, bytes_written: u64) {
        let percent = if self.total_bytes == 0 {
            0
        } else {
            let raw = u128::from(bytes_written) * 100 / u128::from(self.total_bytes);
            raw.min(99) as u8
        };
        self.emit(percent, bytes_written);
    }

    /// Report successful commit.
    pub(crate) fn finish(&mut self) {
        self.emit(100, self.total_bytes);
    }

    fn emit(&mut self, percent: u8, bytes_written: u64) {
        if self.last_percent.is_some_and(|last| percent <= last) {
            return;
        }
        self.last_percent = Some(percent);
        let event = ProgressEvent {
            percent,
            bytes_written,
            total_bytes: self.total_bytes,
        };
        for slot in &mut self.observers {
            let Some(observer) = slot else { continue };
            let delivered = catch_unwind(AssertUnwindSafe(|| observer.on_progress(event)));
            if delivered.is_err() {
                warn!(percent, "progress observer panicked; detaching it");
                *slot = None;
            }
        }
    }
}
