//! Current-state holder with ordered fan-out to subscribers.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::state::UiState;

/// A state value tagged with its position in the emission sequence.
///
/// The initial state is revision 0; every emission increments it.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission<S> {
    pub revision: u64,
    pub state: S,
}

struct Inner<S> {
    current: RwLock<Emission<S>>,
    tx: broadcast::Sender<Emission<S>>,
}

/// Holds the single current state and broadcasts each new one.
///
/// Writes go through [`StateStore::update`] only. The lock is held while
/// broadcasting so subscribers observe emissions in the order applied.
pub struct StateStore<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: UiState> StateStore<S> {
    /// `buffer` bounds how far a subscriber may fall behind before it is
    /// resynchronised to the current state.
    pub fn new(buffer: usize) -> Self {
        let (tx, _rx) = broadcast::channel(buffer.max(1));
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(Emission {
                    revision: 0,
                    state: S::default(),
                }),
                tx,
            }),
        }
    }

    pub fn state(&self) -> S {
        self.inner.current.read().state.clone()
    }

    /// Derive the next state from the current one atomically.
    pub fn update<F>(&self, reduce: F) -> u64
    where
        F: FnOnce(S) -> S,
    {
        let mut current = self.inner.current.write();
        let next = Emission {
            revision: current.revision + 1,
            state: reduce(current.state.clone()),
        };
        *current = next.clone();
        // No subscribers is fine: late subscribers start from `current`.
        let _ = self.inner.tx.send(next);
        current.revision
    }

    pub fn subscribe(&self) -> StateSubscription<S> {
        let current = self.inner.current.read();
        let rx = self.inner.tx.subscribe();
        StateSubscription {
            pending: Some(current.clone()),
            last_revision: None,
            rx,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.tx.receiver_count()
    }
}

/// Ordered view of a [`StateStore`] starting at the state current when
/// subscribing. Dropping it unsubscribes.
pub struct StateSubscription<S> {
    pending: Option<Emission<S>>,
    last_revision: Option<u64>,
    rx: broadcast::Receiver<Emission<S>>,
    store: Weak<Inner<S>>,
}

impl<S: UiState> StateSubscription<S> {
    /// Next emission, never repeating a revision. `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<Emission<S>> {
        if let Some(first) = self.pending.take() {
            self.last_revision = Some(first.revision);
            return Some(first);
        }

        loop {
            let emission = match self.rx.recv().await {
                Ok(emission) => emission,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "State subscriber lagged, resyncing to current state");
                    let inner = self.store.upgrade()?;
                    let current = inner.current.read().clone();
                    current
                }
                Err(RecvError::Closed) => return None,
            };

            if self
                .last_revision
                .is_some_and(|last| emission.revision <= last)
            {
                continue;
            }
            self.last_revision = Some(emission.revision);
            return Some(emission);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u32);
    impl UiState for Counter {}

    async fn next(sub: &mut StateSubscription<Counter>) -> Emission<Counter> {
        tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("no emission")
            .expect("store closed")
    }

    #[tokio::test]
    async fn subscription_starts_with_current_state() {
        let store = StateStore::<Counter>::new(8);
        store.update(|_| Counter(5));

        let mut sub = store.subscribe();
        let first = next(&mut sub).await;
        assert_eq!(first.revision, 1);
        assert_eq!(first.state, Counter(5));
    }

    #[tokio::test]
    async fn emissions_arrive_in_order() {
        let store = StateStore::<Counter>::new(8);
        let mut sub = store.subscribe();
        assert_eq!(next(&mut sub).await.state, Counter(0));

        store.update(|_| Counter(1));
        store.update(|Counter(n)| Counter(n + 10));

        let a = next(&mut sub).await;
        let b = next(&mut sub).await;
        assert_eq!((a.revision, a.state), (1, Counter(1)));
        assert_eq!((b.revision, b.state), (2, Counter(11)));
    }

    #[tokio::test]
    async fn lagging_subscriber_resyncs_without_repeats() {
        let store = StateStore::<Counter>::new(2);
        let mut sub = store.subscribe();
        assert_eq!(next(&mut sub).await.revision, 0);

        for n in 1..=6 {
            store.update(|_| Counter(n));
        }

        let resynced = next(&mut sub).await;
        assert_eq!(resynced.revision, 6);
        assert_eq!(resynced.state, Counter(6));

        store.update(|_| Counter(7));
        assert_eq!(next(&mut sub).await.revision, 7);
    }

    #[tokio::test]
    async fn recv_ends_when_store_dropped() {
        let store = StateStore::<Counter>::new(4);
        let mut sub = store.subscribe();
        let _ = next(&mut sub).await;
        drop(store);
        assert!(sub.recv().await.is_none());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = StateStore::<Counter>::new(4);
        let sub = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);
        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
    }
}
