use crate::api::UserApi;
use crate::config::UiConfig;
use crate::ui::mvi::{DispatchError, Lifecycle, LifecyclePhase};
use crate::ui::users::{observe, UsersIntent, UsersState, UsersView, UsersViewModel, ViewModelSettings};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// The single screen: owns its lifecycle, view model and observer.
pub struct App {
    should_quit: bool,
    lifecycle: Lifecycle,
    view_model: UsersViewModel,
    view: Arc<Mutex<UsersView>>,
    observer: JoinHandle<()>,
    redraw: Arc<Notify>,
    pause_on_focus_loss: bool,
    selected: usize,
    spinner_frame: usize,
}

impl App {
    /// Create the screen and enter its active phase.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(api: Arc<dyn UserApi>, ui: &UiConfig) -> Self {
        let lifecycle = Lifecycle::new();
        let view_model =
            UsersViewModel::new(api, lifecycle.handle(), ViewModelSettings::from(ui));
        let view = Arc::new(Mutex::new(UsersView::new(ui.toast_duration())));
        let redraw = Arc::new(Notify::new());
        let observer = observe(
            Arc::clone(&view),
            view_model.store().clone(),
            lifecycle.handle(),
            Arc::clone(&redraw),
        );
        lifecycle.start();

        Self {
            should_quit: false,
            lifecycle,
            view_model,
            view,
            observer,
            redraw,
            pause_on_focus_loss: ui.pause_on_focus_loss,
            selected: 0,
            spinner_frame: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
        self.lifecycle.destroy();
    }

    pub fn lifecycle_phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    pub fn on_focus_gained(&mut self) {
        if self.pause_on_focus_loss {
            self.lifecycle.start();
        }
    }

    pub fn on_focus_lost(&mut self) {
        if self.pause_on_focus_loss {
            self.lifecycle.stop();
        }
    }

    /// Press the fetch trigger. Ignored while the trigger is hidden.
    pub fn press_trigger(&mut self) -> bool {
        if !self.view.lock().trigger_visible() {
            return false;
        }
        self.dispatch(UsersIntent::FetchUsers)
    }

    /// Hand `intent` to the view model. Returns false if it was rejected.
    pub fn dispatch(&self, intent: UsersIntent) -> bool {
        let intents = self.view_model.intents();
        match intents.try_send(intent.clone()) {
            Ok(()) => true,
            Err(DispatchError::Full) => {
                tokio::spawn(async move {
                    if let Err(err) = intents.send(intent).await {
                        tracing::debug!(error = %err, "Queued intent not delivered");
                    }
                });
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, ?intent, "Intent not dispatched");
                false
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.view.lock().expire_toast(Instant::now());
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.view.lock().users().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max = (len - 1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.view.lock().users().len().saturating_sub(1);
    }

    /// Selected row, clamped to the current list.
    pub fn selected(&self) -> usize {
        let len = self.view.lock().users().len();
        self.selected.min(len.saturating_sub(1))
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    /// Locked screen model. Keep the guard short-lived.
    pub fn view(&self) -> MutexGuard<'_, UsersView> {
        self.view.lock()
    }

    /// Current state held by the view model.
    pub fn state(&self) -> UsersState {
        self.view_model.state()
    }

    /// Notified whenever the observer applied a new state.
    pub fn redraw_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.redraw)
    }

    /// Destroy the screen and wait for its tasks to wind down.
    ///
    /// In-flight fetches are left to finish on their own.
    pub async fn shutdown(self) {
        let App {
            lifecycle,
            view_model,
            observer,
            ..
        } = self;
        lifecycle.destroy();
        if let Err(err) = observer.await {
            tracing::error!(error = %err, "State observer terminated abnormally");
        }
        view_model.join().await;
    }
}
