//! Typed change notifications between views.
//!
//! The session manager publishes after each successful mutation; anything
//! that renders sessions (the calendar) subscribes and reloads when it
//! drains a change.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::session::Session;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Created(Session),
    Updated(Session),
    Deleted(i64),
    /// The subscriber fell behind and lost `missed` changes; treat as
    /// "something changed".
    Resync { missed: u64 },
}

impl SessionChange {
    pub fn session_id(&self) -> Option<i64> {
        match self {
            SessionChange::Created(s) | SessionChange::Updated(s) => s.id,
            SessionChange::Deleted(id) => Some(*id),
            SessionChange::Resync { .. } => None,
        }
    }
}

/// Publishing side. Cheap to clone; all clones feed the same subscribers.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<SessionChange>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        ChangeNotifier { tx }
    }

    /// Publish a change. Having no subscribers is fine.
    pub fn publish(&self, change: SessionChange) {
        if self.tx.send(change).is_err() {
            tracing::trace!("session change published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving side, polled without blocking.
pub struct ChangeSubscription {
    rx: broadcast::Receiver<SessionChange>,
}

impl ChangeSubscription {
    /// Everything published since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<SessionChange> {
        let mut changes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(change) => changes.push(change),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "change subscriber lagged");
                    changes.push(SessionChange::Resync { missed });
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_changes_in_order() {
        let notifier = ChangeNotifier::new();
        let mut sub = notifier.subscribe();

        notifier.publish(SessionChange::Deleted(4));
        notifier.publish(SessionChange::Created(Session {
            id: Some(5),
            title: "New".into(),
            ..Default::default()
        }));

        let changes = sub.drain();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0], SessionChange::Deleted(4));
        assert_eq!(changes[1].session_id(), Some(5));
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let notifier = ChangeNotifier::new();
        notifier.publish(SessionChange::Deleted(1));

        let mut late = notifier.subscribe();
        assert!(late.drain().is_empty());
    }

    #[test]
    fn lagging_subscriber_gets_resync() {
        let notifier = ChangeNotifier::new();
        let mut sub = notifier.subscribe();
        for id in 0..(CHANNEL_CAPACITY as i64 + 3) {
            notifier.publish(SessionChange::Deleted(id));
        }
        let changes = sub.drain();
        assert_eq!(changes[0], SessionChange::Resync { missed: 3 });
        assert_eq!(changes.len(), CHANNEL_CAPACITY + 1);
    }
}
