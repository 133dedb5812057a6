//! Lifecycle-scoped rendering of view model state.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::*;
use mvi_users::ui::mvi::Lifecycle;
use mvi_users::ui::users::{observe, UsersIntent, UsersState, UsersView, UsersViewModel};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

struct Screen {
    lifecycle: Lifecycle,
    vm: UsersViewModel,
    view: Arc<Mutex<UsersView>>,
    redraw: Arc<Notify>,
    observer: JoinHandle<()>,
}

fn screen(api: MockUserApi) -> Screen {
    let lifecycle = Lifecycle::new();
    let vm = make_view_model(Arc::new(api), &lifecycle);
    let view = Arc::new(Mutex::new(UsersView::new(Duration::from_secs(5))));
    let redraw = Arc::new(Notify::new());
    let observer = observe(
        Arc::clone(&view),
        vm.store().clone(),
        lifecycle.handle(),
        Arc::clone(&redraw),
    );
    lifecycle.start();
    Screen {
        lifecycle,
        vm,
        view,
        redraw,
        observer,
    }
}

impl Screen {
    async fn fetch(&self) {
        self.vm
            .intents()
            .send(UsersIntent::FetchUsers)
            .await
            .expect("dispatch failed");
    }

    async fn wait_until_unsubscribed(&self) {
        let store = self.vm.store().clone();
        eventually(|| store.subscriber_count() == 0, "observer to unsubscribe").await;
    }

    async fn wait_until_subscribed(&self) {
        let store = self.vm.store().clone();
        eventually(|| store.subscriber_count() == 1, "observer to subscribe").await;
    }
}

#[tokio::test]
async fn loaded_state_renders_users_in_order() {
    let screen = screen(MockUserApi::returning(users_ab()));
    screen.fetch().await;

    let view = Arc::clone(&screen.view);
    eventually(|| view.lock().list_visible(), "list to become visible").await;

    let view = screen.view.lock();
    assert_eq!(view.users(), users_ab().as_slice());
    assert!(!view.trigger_visible());
    assert!(!view.progress_visible());
    assert!(view.toast().is_none());
}

#[tokio::test]
async fn failed_state_toasts_and_reshows_trigger() {
    let screen = screen(MockUserApi::failing("timeout"));
    screen.fetch().await;

    let view = Arc::clone(&screen.view);
    eventually(|| view.lock().toast().is_some(), "error toast").await;

    let view = screen.view.lock();
    assert_eq!(view.toast().unwrap().message, "timeout");
    assert!(view.trigger_visible());
    assert!(!view.progress_visible());
}

#[tokio::test]
async fn observer_notifies_redraw() {
    let screen = screen(MockUserApi::returning(users_ab()));
    let notified = screen.redraw.notified();
    tokio::pin!(notified);
    notified.as_mut().enable();

    screen.fetch().await;
    tokio::time::timeout(WAIT, notified)
        .await
        .expect("no redraw notification");
}

#[tokio::test]
async fn resubscribing_does_not_duplicate_users() {
    let screen = screen(MockUserApi::returning(users_ab()));
    screen.fetch().await;
    let view = Arc::clone(&screen.view);
    eventually(|| view.lock().list_visible(), "list to become visible").await;
    let revision = screen.view.lock().last_revision();

    screen.lifecycle.stop();
    screen.wait_until_unsubscribed().await;
    screen.lifecycle.start();
    screen.wait_until_subscribed().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let view = screen.view.lock();
    assert_eq!(view.users().len(), 2);
    assert_eq!(view.last_revision(), revision);
}

#[tokio::test]
async fn resubscribing_does_not_repeat_error_toast() {
    let screen = screen(MockUserApi::failing("timeout"));
    screen.fetch().await;
    let view = Arc::clone(&screen.view);
    eventually(|| view.lock().toast().is_some(), "error toast").await;

    screen
        .view
        .lock()
        .expire_toast(Instant::now() + Duration::from_secs(3600));
    assert!(screen.view.lock().toast().is_none());

    screen.lifecycle.stop();
    screen.wait_until_unsubscribed().await;
    screen.lifecycle.start();
    screen.wait_until_subscribed().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(screen.view.lock().toast().is_none());
    assert!(screen.view.lock().trigger_visible());
}

#[tokio::test]
async fn result_arriving_while_stopped_is_rendered_on_restart() {
    let (api, gate) = MockUserApi::returning(users_ab()).gated();
    let screen = screen(api);
    screen.fetch().await;

    let view = Arc::clone(&screen.view);
    eventually(|| view.lock().progress_visible(), "progress indicator").await;

    screen.lifecycle.stop();
    screen.wait_until_unsubscribed().await;

    gate.add_permits(1);
    let store = screen.vm.store().clone();
    eventually(
        || matches!(store.state(), UsersState::Loaded { .. }),
        "fetch to complete",
    )
    .await;

    // Nothing renders while stopped.
    assert!(screen.view.lock().progress_visible());
    assert!(!screen.view.lock().list_visible());

    screen.lifecycle.start();
    let view = Arc::clone(&screen.view);
    eventually(|| view.lock().list_visible(), "list after restart").await;
    assert!(!screen.view.lock().progress_visible());
    assert_eq!(screen.view.lock().users(), users_ab().as_slice());
}

#[tokio::test]
async fn observer_ends_when_screen_destroyed() {
    let screen = screen(MockUserApi::returning(users_ab()));
    screen.wait_until_subscribed().await;

    screen.lifecycle.destroy();
    tokio::time::timeout(WAIT, screen.observer)
        .await
        .expect("observer still running")
        .unwrap();
    assert_eq!(screen.vm.store().subscriber_count(), 0);
}
