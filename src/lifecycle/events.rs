//! Client event bus.

use tokio::sync::broadcast;

use crate::analyst::PassSummary;

/// Lifecycle notifications published by a running client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Configuration resolved, allow-list loaded, polling about to begin.
    Ready,
    /// An analysis pass finished.
    PassCompleted(PassSummary),
    /// An analysis pass aborted before producing a report.
    PassFailed(String),
}

/// Broadcast channel for [`ClientEvent`]s.
///
/// Publishing never blocks and never fails; events sent while nobody listens
/// are dropped. Slow subscribers see `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ClientEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(ClientEvent::Ready);
        bus.publish(ClientEvent::PassFailed("boom".into()));

        assert_eq!(a.recv().await.unwrap(), ClientEvent::Ready);
        assert_eq!(b.recv().await.unwrap(), ClientEvent::Ready);
        assert_eq!(a.recv().await.unwrap(), ClientEvent::PassFailed("boom".into()));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(0);
        bus.publish(ClientEvent::Ready);
        assert_eq!(bus.receiver_count(), 0);
    }
}
