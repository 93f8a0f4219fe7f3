//! Fire-and-forget event publication. The host node's own `notify` crate
//! runs a named-subscriber registry over `crossbeam-channel` on a dedicated
//! thread; this module adapts the same "subscribe, then get everything
//! published after that point" shape to the async pipeline with
//! `tokio::sync::broadcast`, since the mempool's collaborators are already
//! `async fn` rather than OS threads reading a channel in a loop.

use tokio::sync::broadcast;

use crate::transaction::Transaction;

const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub enum MempoolEvent {
    /// Published at most once per successful verification.
    UnconfirmedTransaction { tx: Transaction, broadcast: bool },
}

pub struct EventBus {
    sender: broadcast::Sender<MempoolEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MempoolEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. A lagging or absent subscriber never blocks the
    /// publisher or surfaces as an error to the caller.
    pub fn publish(&self, event: MempoolEvent) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Transaction;

    #[tokio::test]
    async fn publish_is_received_by_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let tx = Transaction::new("a", vec![1]);
        bus.publish(MempoolEvent::UnconfirmedTransaction { tx: tx.clone(), broadcast: true });
        let MempoolEvent::UnconfirmedTransaction { tx: got, broadcast } = rx.recv().await.unwrap();
        assert_eq!(got.id, tx.id);
        assert!(broadcast);
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.publish(MempoolEvent::UnconfirmedTransaction {
            tx: Transaction::new("a", vec![1]),
            broadcast: false,
        });
    }
}
