//! State for the user list screen.

use crate::api::User;
use crate::ui::mvi::UiState;

/// Mutually exclusive screen conditions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UsersState {
    /// Nothing requested yet. Only ever the initial value.
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading,

    /// Latest fetch succeeded.
    Loaded { users: Vec<User> },

    /// Latest fetch failed, with a human-readable description.
    Failed { message: Option<String> },
}

impl UiState for UsersState {}

impl UsersState {
    /// Short label for the header.
    pub fn label(&self) -> String {
        match self {
            UsersState::Idle => "Idle".to_string(),
            UsersState::Loading => "Loading".to_string(),
            UsersState::Loaded { users } => match users.len() {
                1 => "1 user".to_string(),
                n => format!("{} users", n),
            },
            UsersState::Failed { .. } => "Error".to_string(),
        }
    }
}
