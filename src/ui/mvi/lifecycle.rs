//! Screen lifecycle and lifecycle-scoped work.
//!
//! A screen moves `Created → Started ⇄ Stopped → Destroyed`. Only the
//! `Started` phase is active: intents are delivered and state is observed
//! while it lasts. `Destroyed` is terminal.

use std::future::Future;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Created,
    Started,
    Stopped,
    Destroyed,
}

impl LifecyclePhase {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Started)
    }

    pub fn is_destroyed(self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

/// Owner side of a screen lifecycle. Dropping it destroys the screen.
pub struct Lifecycle {
    tx: watch::Sender<LifecyclePhase>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LifecyclePhase::Created);
        Self { tx }
    }

    pub fn phase(&self) -> LifecyclePhase {
        *self.tx.borrow()
    }

    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Enter the active phase. Returns false if nothing changed.
    pub fn start(&self) -> bool {
        self.transition(LifecyclePhase::Started)
    }

    /// Leave the active phase.
    pub fn stop(&self) -> bool {
        self.transition(LifecyclePhase::Stopped)
    }

    pub fn destroy(&self) -> bool {
        self.transition(LifecyclePhase::Destroyed)
    }

    fn transition(&self, next: LifecyclePhase) -> bool {
        let mut previous = next;
        let changed = self.tx.send_if_modified(|phase| {
            if phase.is_destroyed() || *phase == next {
                return false;
            }
            previous = *phase;
            *phase = next;
            true
        });
        if changed {
            tracing::debug!(from = ?previous, to = ?next, "Lifecycle transition");
        }
        changed
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Read side of a [`Lifecycle`], cheap to clone into tasks.
#[derive(Clone)]
pub struct LifecycleHandle {
    rx: watch::Receiver<LifecyclePhase>,
}

impl LifecycleHandle {
    pub fn phase(&self) -> LifecyclePhase {
        *self.rx.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.phase().is_active()
    }

    /// Wait for the active phase. Returns false once destroyed.
    pub async fn wait_until_active(&mut self) -> bool {
        self.rx
            .wait_for(|phase| phase.is_active() || phase.is_destroyed())
            .await
            .map(|phase| phase.is_active())
            .unwrap_or(false)
    }

    /// Wait until the active phase ends. Returns false if it ended by destruction.
    pub async fn wait_until_inactive(&mut self) -> bool {
        self.rx
            .wait_for(|phase| !phase.is_active())
            .await
            .map(|phase| !phase.is_destroyed())
            .unwrap_or(false)
    }

    pub async fn wait_until_destroyed(&mut self) {
        let _ = self.rx.wait_for(|phase| phase.is_destroyed()).await;
    }
}

/// Run `block` once per active span.
///
/// Each time the lifecycle enters `Started` a fresh future is created from
/// `block`; it is dropped as soon as the phase leaves `Started`. Returns
/// when the lifecycle is destroyed.
pub async fn repeat_on_active<F, Fut>(mut lifecycle: LifecycleHandle, mut block: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    while lifecycle.wait_until_active().await {
        let span = block();
        tokio::pin!(span);
        let alive = tokio::select! {
            _ = &mut span => lifecycle.wait_until_inactive().await,
            alive = lifecycle.wait_until_inactive() => alive,
        };
        if !alive {
            break;
        }
    }
}
