//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the building blocks for unidirectional data flow
//! in the UI layer.
//!
//! # Architecture
//!
//! ```text
//! View ──→ IntentSender ──→ view model ──→ Reducer ──→ StateStore
//!   ↑                                                       │
//!   └──────────── StateSubscription (active spans only) ────┘
//! ```
//!
//! - **State**: Immutable representation of UI state
//! - **Intent**: User actions or system events
//! - **Reducer**: Pure function that transforms state based on intents
//! - **Lifecycle**: Screen phases gating intent delivery and subscriptions

mod channel;
mod intent;
mod lifecycle;
mod reducer;
mod state;
mod store;

pub use channel::{intent_channel, DispatchError, IntentReceiver, IntentSender};
pub use intent::Intent;
pub use lifecycle::{repeat_on_active, Lifecycle, LifecycleHandle, LifecyclePhase};
pub use reducer::Reducer;
pub use state::UiState;
pub use store::{Emission, StateStore, StateSubscription};
