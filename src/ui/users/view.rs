//! Screen model for the user list and the observer that drives it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::api::User;
use crate::ui::mvi::{repeat_on_active, Emission, LifecycleHandle, StateStore};

use super::state::UsersState;

/// Shown when a failure carries no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Transient error notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// What the screen currently shows.
///
/// Mutated only by [`UsersView::apply`] (render mapping) and
/// [`UsersView::expire_toast`] (timer). The draw loop reads it.
#[derive(Debug, Clone)]
pub struct UsersView {
    trigger_visible: bool,
    progress_visible: bool,
    list_visible: bool,
    users: Vec<User>,
    toast: Option<Toast>,
    toast_duration: Duration,
    status: String,
    failed: bool,
    last_revision: Option<u64>,
}

impl UsersView {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            trigger_visible: true,
            progress_visible: false,
            list_visible: false,
            users: Vec::new(),
            toast: None,
            toast_duration,
            status: UsersState::Idle.label(),
            failed: false,
            last_revision: None,
        }
    }

    /// Apply the render mapping for one emission.
    ///
    /// Emissions at or below the last applied revision are ignored, so a
    /// resubscription never repeats an effect. Returns whether anything
    /// was applied.
    pub fn apply(&mut self, emission: &Emission<UsersState>) -> bool {
        if self
            .last_revision
            .is_some_and(|last| emission.revision <= last)
        {
            return false;
        }
        self.last_revision = Some(emission.revision);
        self.status = emission.state.label();
        self.failed = matches!(emission.state, UsersState::Failed { .. });

        match &emission.state {
            UsersState::Idle => {}
            UsersState::Loading => {
                self.trigger_visible = false;
                self.progress_visible = true;
            }
            UsersState::Loaded { users } => {
                self.progress_visible = false;
                self.trigger_visible = false;
                self.users = users.clone();
                self.list_visible = true;
            }
            UsersState::Failed { message } => {
                self.progress_visible = false;
                self.trigger_visible = true;
                self.toast = Some(Toast {
                    message: message
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
                    shown_at: Instant::now(),
                    duration: self.toast_duration,
                });
            }
        }
        true
    }

    /// Drop the toast once its time is up. Returns true if it was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn trigger_visible(&self) -> bool {
        self.trigger_visible
    }

    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    pub fn list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// True while the last applied state is a failure.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn last_revision(&self) -> Option<u64> {
        self.last_revision
    }
}

/// Keep `view` in sync with `store` during active lifecycle spans.
///
/// A fresh subscription is taken each time the screen becomes active and
/// dropped when it stops; `redraw` is notified after every applied state.
/// The task ends when the lifecycle is destroyed.
pub fn observe(
    view: Arc<Mutex<UsersView>>,
    store: StateStore<UsersState>,
    lifecycle: LifecycleHandle,
    redraw: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(repeat_on_active(lifecycle, move || {
        let view = Arc::clone(&view);
        let redraw = Arc::clone(&redraw);
        let mut subscription = store.subscribe();
        async move {
            tracing::debug!("State observer subscribed");
            while let Some(emission) = subscription.recv().await {
                let applied = view.lock().apply(&emission);
                if applied {
                    redraw.notify_one();
                }
            }
        }
    }))
}
