//! Network collaborator: the remote "list users" operation.
//!
//! The UI core only depends on the [`UserApi`] trait. [`HttpUserApi`] is the
//! shipped implementation talking to a JSON endpoint over reqwest.

mod client;
mod error;
mod user;

pub use client::HttpUserApi;
pub use error::ApiError;
pub use user::{User, UserId};

use async_trait::async_trait;

/// Source of user records.
///
/// Implementations own transport, encoding and endpoint details. Every
/// failure must come back as an [`ApiError`]; callers never see a panic
/// from a well-behaved implementation.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the full user list, in the order the remote returns it.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
}
