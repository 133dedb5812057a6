//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use mvi_users::api::{ApiError, User, UserApi};
use mvi_users::ui::mvi::{Emission, Lifecycle, StateSubscription};
use mvi_users::ui::users::{UsersState, UsersViewModel, ViewModelSettings};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const WAIT: Duration = Duration::from_secs(2);

/// What a [`MockUserApi`] call produces.
#[derive(Debug, Clone)]
pub enum Reply {
    Users(Vec<User>),
    Fail(String),
    Panic(String),
}

/// Scripted [`UserApi`].
///
/// Replies are consumed in call order; once the script is exhausted the
/// last reply repeats. With a gate, every call waits for one permit.
pub struct MockUserApi {
    replies: Mutex<VecDeque<Reply>>,
    last: Mutex<Reply>,
    gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl MockUserApi {
    pub fn scripted(replies: Vec<Reply>) -> Self {
        let last = replies
            .last()
            .cloned()
            .unwrap_or(Reply::Fail("no reply scripted".to_string()));
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(last),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(users: Vec<User>) -> Self {
        Self::scripted(vec![Reply::Users(users)])
    }

    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Reply::Fail(message.to_string())])
    }

    pub fn panicking(message: &str) -> Self {
        Self::scripted(vec![Reply::Panic(message.to_string())])
    }

    /// Hold every call until a permit is added to the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserApi for MockUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        let reply = {
            let mut replies = self.replies.lock();
            match replies.pop_front() {
                Some(reply) => reply,
                None => self.last.lock().clone(),
            }
        };
        match reply {
            Reply::Users(users) => Ok(users),
            Reply::Fail(message) => Err(ApiError::Other(message)),
            Reply::Panic(message) => panic!("{}", message),
        }
    }
}

pub fn users_ab() -> Vec<User> {
    vec![User::new(1, "A"), User::new(2, "B")]
}

pub fn started_lifecycle() -> Lifecycle {
    let lifecycle = Lifecycle::new();
    lifecycle.start();
    lifecycle
}

pub fn make_view_model(api: Arc<dyn UserApi>, lifecycle: &Lifecycle) -> UsersViewModel {
    UsersViewModel::new(api, lifecycle.handle(), ViewModelSettings::default())
}

/// Next emission, failing the test if none arrives in time.
pub async fn next_emission(sub: &mut StateSubscription<UsersState>) -> Emission<UsersState> {
    tokio::time::timeout(WAIT, sub.recv())
        .await
        .expect("timed out waiting for a state emission")
        .expect("state store closed")
}

pub async fn next_state(sub: &mut StateSubscription<UsersState>) -> UsersState {
    next_emission(sub).await.state
}

/// Assert nothing is emitted for `millis`.
pub async fn assert_quiet(sub: &mut StateSubscription<UsersState>, millis: u64) {
    let result = tokio::time::timeout(Duration::from_millis(millis), sub.recv()).await;
    if let Ok(emission) = result {
        panic!("unexpected emission: {:?}", emission);
    }
}

/// Poll `condition` until it holds or [`WAIT`] elapses.
pub async fn eventually<F: FnMut() -> bool>(mut condition: F, what: &str) {
    let deadline = tokio::time::Instant::now() + WAIT;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {}", what);
}
