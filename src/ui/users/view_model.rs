//! View model for the user list screen.
//!
//! Consumes [`UsersIntent`]s one at a time. Each `FetchUsers` emits
//! `Loading` immediately, then runs the remote call as its own task so
//! later intents are not blocked by a slow fetch.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::UserApi;
use crate::config::UiConfig;
use crate::ui::mvi::{
    intent_channel, IntentReceiver, IntentSender, LifecycleHandle, Reducer, StateStore,
    StateSubscription,
};

use super::intent::{FetchEvent, UsersIntent};
use super::reducer::UsersReducer;
use super::state::UsersState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModelSettings {
    pub intent_capacity: usize,
    pub state_buffer: usize,
}

impl Default for ViewModelSettings {
    fn default() -> Self {
        let ui = UiConfig::default();
        Self::from(&ui)
    }
}

impl From<&UiConfig> for ViewModelSettings {
    fn from(ui: &UiConfig) -> Self {
        Self {
            intent_capacity: ui.intent_capacity,
            state_buffer: ui.state_buffer,
        }
    }
}

pub struct UsersViewModel {
    intents: IntentSender<UsersIntent>,
    store: StateStore<UsersState>,
    worker: JoinHandle<()>,
}

impl UsersViewModel {
    /// Build the view model around a network collaborator.
    ///
    /// Must be called inside a tokio runtime. The intent loop runs until
    /// `lifecycle` is destroyed.
    pub fn new(
        api: Arc<dyn UserApi>,
        lifecycle: LifecycleHandle,
        settings: ViewModelSettings,
    ) -> Self {
        let (intents, receiver) = intent_channel(settings.intent_capacity, lifecycle.clone());
        let store = StateStore::new(settings.state_buffer);
        let worker = tokio::spawn(run_intent_loop(receiver, api, store.clone(), lifecycle));

        Self {
            intents,
            store,
            worker,
        }
    }

    /// Sender half of the intent channel, for the view.
    pub fn intents(&self) -> IntentSender<UsersIntent> {
        self.intents.clone()
    }

    pub fn store(&self) -> &StateStore<UsersState> {
        &self.store
    }

    pub fn state(&self) -> UsersState {
        self.store.state()
    }

    pub fn subscribe(&self) -> StateSubscription<UsersState> {
        self.store.subscribe()
    }

    /// Wait for the intent loop to exit (after the lifecycle is destroyed).
    pub async fn join(self) {
        if let Err(err) = self.worker.await {
            tracing::error!(error = %err, "Intent loop terminated abnormally");
        }
    }
}

async fn run_intent_loop(
    mut intents: IntentReceiver<UsersIntent>,
    api: Arc<dyn UserApi>,
    store: StateStore<UsersState>,
    mut lifecycle: LifecycleHandle,
) {
    let mut next_request = 0u64;

    loop {
        tokio::select! {
            intent = intents.recv() => match intent {
                Some(UsersIntent::FetchUsers) => {
                    next_request += 1;
                    start_fetch(next_request, Arc::clone(&api), store.clone());
                }
                None => break,
            },
            _ = lifecycle.wait_until_destroyed() => {
                intents.close();
                break;
            }
        }
    }

    tracing::debug!("Intent loop stopped");
}

fn start_fetch(request: u64, api: Arc<dyn UserApi>, store: StateStore<UsersState>) {
    tracing::info!(request, "Fetching users");
    store.update(|state| UsersReducer::reduce(state, FetchEvent::Started { request }));

    tokio::spawn(async move {
        // Nested task: a panicking collaborator comes back as a JoinError.
        let outcome = tokio::spawn(async move { api.list_users().await }).await;

        let event = match outcome {
            Ok(Ok(users)) => {
                tracing::info!(request, count = users.len(), "Users fetched");
                FetchEvent::Succeeded { request, users }
            }
            Ok(Err(err)) => {
                tracing::warn!(request, kind = err.kind(), error = %err, "Fetch failed");
                FetchEvent::Failed {
                    request,
                    message: Some(err.to_string()),
                }
            }
            Err(err) => {
                tracing::warn!(request, error = %err, "Fetch task aborted");
                FetchEvent::Failed {
                    request,
                    message: Some(format!("Unexpected failure: {}", err)),
                }
            }
        };

        tracing::trace!(request = event.request(), "Applying fetch result");
        store.update(|state| UsersReducer::reduce(state, event));
    });
}
