//! User list screen.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `intent.rs` - User intent (`FetchUsers`) and fetch progress events
//! - `state.rs` - Screen condition (Idle → Loading → Loaded | Failed)
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `view_model.rs` - Intent loop and fetch orchestration
//! - `view.rs` - Screen model and the lifecycle-scoped observer

mod intent;
mod reducer;
mod state;
mod view;
mod view_model;

pub use intent::{FetchEvent, UsersIntent};
pub use reducer::UsersReducer;
pub use state::UsersState;
pub use view::{observe, Toast, UsersView, UNKNOWN_ERROR};
pub use view_model::{UsersViewModel, ViewModelSettings};
