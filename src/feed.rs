use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Which counter table changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Visits,
    Clicks,
}

/// In-process change feed for the counter rows.
///
/// Every successful increment publishes one event. Publishing never fails:
/// with no subscribers the event is simply dropped.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: ChangeEvent) {
        let _ = self.tx.send(event);
    }

    /// Opens a subscription that sees every event published from now on.
    /// Dropping the returned handle closes the subscription.
    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

pub struct ChangeSubscription {
    rx: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    /// Waits for the next event. Returns `None` once the feed is gone.
    /// A lagged receiver skips ahead to the oldest retained event.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Consumes all pending events without waiting and reports whether any
    /// change happened since the last call. Lag counts as a change; the
    /// events themselves are coalesced into a single "stale" answer.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscription_receives_published_events() {
        let feed = ChangeFeed::new(8);
        let mut sub = feed.subscribe();
        feed.publish(ChangeEvent::Visits);
        feed.publish(ChangeEvent::Clicks);

        assert_eq!(sub.next().await, Some(ChangeEvent::Visits));
        assert_eq!(sub.next().await, Some(ChangeEvent::Clicks));
    }

    #[tokio::test]
    async fn drain_coalesces_pending_events() {
        let feed = ChangeFeed::new(8);
        let mut sub = feed.subscribe();
        assert!(!sub.drain());

        feed.publish(ChangeEvent::Visits);
        feed.publish(ChangeEvent::Visits);
        assert!(sub.drain());
        assert!(!sub.drain());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let feed = ChangeFeed::new(8);
        feed.publish(ChangeEvent::Clicks);

        // A subscription opened afterwards starts clean.
        let mut sub = feed.subscribe();
        assert!(!sub.drain());
    }

    #[tokio::test]
    async fn next_returns_none_when_feed_is_dropped() {
        let feed = ChangeFeed::new(8);
        let mut sub = feed.subscribe();
        drop(feed);
        assert_eq!(sub.next().await, None);
    }
}
