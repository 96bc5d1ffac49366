//! Hand-off of driver diagnostic messages to the render loop.
//!
//! The GL runtime may invoke its debug callback from an internal thread, or re-entrantly while
//! the loop is polling. The callback therefore only pushes into a bounded channel through a
//! [`DebugSender`], and the lifecycle drains the [`DebugReceiver`] once per frame.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError};

pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugSource {
    Api,
    WindowSystem,
    ShaderCompiler,
    ThirdParty,
    Application,
    Other,
    Unknown(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugKind {
    Error,
    DeprecatedBehavior,
    UndefinedBehavior,
    Portability,
    Performance,
    Marker,
    PushGroup,
    PopGroup,
    Other,
    Unknown(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugSeverity {
    High,
    Medium,
    Low,
    Notification,
    Unknown(u32),
}

impl DebugSeverity {
    pub fn log_level(self) -> log::Level {
        match self {
            DebugSeverity::High => log::Level::Error,
            DebugSeverity::Medium => log::Level::Warn,
            DebugSeverity::Low => log::Level::Info,
            DebugSeverity::Notification | DebugSeverity::Unknown(_) => log::Level::Debug,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugMessage {
    pub source: DebugSource,
    pub kind: DebugKind,
    pub id: u32,
    pub severity: DebugSeverity,
    pub text: String,
}

/// Creates a bounded hand-off holding at most `capacity` undelivered messages.
pub fn channel(capacity: usize) -> (DebugSender, DebugReceiver) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    let dropped = Arc::new(AtomicUsize::new(0));

    (
        DebugSender { tx, dropped: Arc::clone(&dropped) },
        DebugReceiver { rx, dropped },
    )
}

/// Producer side. Safe to call from any thread.
#[derive(Debug, Clone)]
pub struct DebugSender {
    tx: Sender<DebugMessage>,
    dropped: Arc<AtomicUsize>,
}

impl DebugSender {
    /// Queues a message without blocking. Returns false if it was discarded.
    pub fn deliver(&self, message: DebugMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

#[derive(Debug)]
pub struct DebugReceiver {
    rx: Receiver<DebugMessage>,
    dropped: Arc<AtomicUsize>,
}

impl DebugReceiver {
    pub fn try_next(&self) -> Option<DebugMessage> {
        self.rx.try_recv().ok()
    }

    /// Number of messages discarded because the queue was full since the last call.
    pub fn take_dropped(&self) -> usize {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn message(id: u32) -> DebugMessage {
        DebugMessage {
            source: DebugSource::Api,
            kind: DebugKind::Performance,
            id,
            severity: DebugSeverity::Low,
            text: format!("message {}", id),
        }
    }

    #[test]
    fn messages_arrive_in_order() {
        let (tx, rx) = channel(8);

        for id in 0..3 {
            assert!(tx.deliver(message(id)));
        }

        let ids: Vec<u32> = std::iter::from_fn(|| rx.try_next()).map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(rx.try_next().is_none());
    }

    #[test]
    fn full_queue_drops_and_counts() {
        let (tx, rx) = channel(2);

        assert!(tx.deliver(message(0)));
        assert!(tx.deliver(message(1)));
        assert!(!tx.deliver(message(2)));
        assert!(!tx.deliver(message(3)));

        assert_eq!(rx.take_dropped(), 2);
        assert_eq!(rx.take_dropped(), 0);
        assert_eq!(rx.try_next().map(|m| m.id), Some(0));
    }

    #[test]
    fn sender_works_from_another_thread() {
        let (tx, rx) = channel(4);

        std::thread::spawn(move || {
            tx.deliver(message(7));
        })
        .join()
        .unwrap();

        assert_eq!(rx.try_next().map(|m| m.id), Some(7));
    }

    #[test]
    fn severity_maps_to_log_levels() {
        assert_eq!(DebugSeverity::High.log_level(), log::Level::Error);
        assert_eq!(DebugSeverity::Medium.log_level(), log::Level::Warn);
        assert_eq!(DebugSeverity::Notification.log_level(), log::Level::Debug);
    }
}
