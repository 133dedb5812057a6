//! Intent channel: many producers, one consumer, FIFO.
//!
//! Delivery is gated by the screen lifecycle. Sends issued outside the
//! active phase are rejected instead of queued, and once the screen is
//! destroyed the channel reports itself closed.

use thiserror::Error;
use tokio::sync::mpsc;

use super::intent::Intent;
use super::lifecycle::LifecycleHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Screen is not in its active phase; the intent was not delivered
    #[error("screen is not active")]
    Inactive,

    /// Queue is at capacity (only from `try_send`)
    #[error("intent queue is full")]
    Full,

    /// Consumer is gone or the screen was destroyed
    #[error("intent channel is closed")]
    Closed,
}

/// Create a bounded intent channel tied to `lifecycle`.
pub fn intent_channel<I: Intent>(
    capacity: usize,
    lifecycle: LifecycleHandle,
) -> (IntentSender<I>, IntentReceiver<I>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (IntentSender { tx, lifecycle }, IntentReceiver { rx })
}

pub struct IntentSender<I> {
    tx: mpsc::Sender<I>,
    lifecycle: LifecycleHandle,
}

impl<I> Clone for IntentSender<I> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<I: Intent> IntentSender<I> {
    fn check_phase(&self) -> Result<(), DispatchError> {
        let phase = self.lifecycle.phase();
        if phase.is_destroyed() || self.tx.is_closed() {
            return Err(DispatchError::Closed);
        }
        if !phase.is_active() {
            tracing::trace!(?phase, "Intent dropped: screen not active");
            return Err(DispatchError::Inactive);
        }
        Ok(())
    }

    /// Queue `intent`, waiting for room if the queue is full.
    ///
    /// The wait is abandoned when the screen leaves the active phase, so an
    /// intent is never delivered while stopped.
    pub async fn send(&self, intent: I) -> Result<(), DispatchError> {
        self.check_phase()?;
        let mut lifecycle = self.lifecycle.clone();
        let permit = tokio::select! {
            permit = self.tx.reserve() => permit.map_err(|_| DispatchError::Closed)?,
            alive = lifecycle.wait_until_inactive() => {
                tracing::trace!(alive, "Pending intent abandoned: screen left active phase");
                return Err(if alive {
                    DispatchError::Inactive
                } else {
                    DispatchError::Closed
                });
            }
        };
        // Phase may have changed while the permit was granted.
        self.check_phase()?;
        permit.send(intent);
        Ok(())
    }

    /// Queue `intent` without waiting.
    pub fn try_send(&self, intent: I) -> Result<(), DispatchError> {
        self.check_phase()?;
        self.tx.try_send(intent).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => DispatchError::Full,
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed() || self.lifecycle.phase().is_destroyed()
    }
}

pub struct IntentReceiver<I> {
    rx: mpsc::Receiver<I>,
}

impl<I: Intent> IntentReceiver<I> {
    /// Next intent in arrival order; `None` once closed and drained.
    pub async fn recv(&mut self) -> Option<I> {
        self.rx.recv().await
    }

    /// Reject further sends. Already queued intents can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
