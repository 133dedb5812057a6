//! Intents for the user list screen.

use crate::api::User;
use crate::ui::mvi::Intent;

/// Actions the user can trigger on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersIntent {
    /// Load the user list from the remote API.
    FetchUsers,
}

impl Intent for UsersIntent {}

/// Progress of a single fetch, reported by the view model.
///
/// `request` numbers fetches in the order their intents were received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Started {
        request: u64,
    },
    Succeeded {
        request: u64,
        users: Vec<User>,
    },
    Failed {
        request: u64,
        message: Option<String>,
    },
}

impl Intent for FetchEvent {}

impl FetchEvent {
    pub fn request(&self) -> u64 {
        match self {
            FetchEvent::Started { request }
            | FetchEvent::Succeeded { request, .. }
            | FetchEvent::Failed { request, .. } => *request,
        }
    }
}
