//! Reducer for the user list screen.

use crate::ui::mvi::Reducer;

use super::intent::FetchEvent;
use super::state::UsersState;

/// Maps fetch progress to screen state.
///
/// Overlapping fetches are independent, so each event fully determines the
/// next state regardless of the previous one.
pub struct UsersReducer;

impl Reducer for UsersReducer {
    type State = UsersState;
    type Intent = FetchEvent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchEvent::Started { .. } => UsersState::Loading,
            FetchEvent::Succeeded { users, .. } => UsersState::Loaded { users },
            FetchEvent::Failed { message, .. } => UsersState::Failed { message },
        }
    }
}
