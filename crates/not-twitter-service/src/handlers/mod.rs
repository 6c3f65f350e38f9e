//! API handlers.
//!
//! Every handler follows the same shape: authenticate the caller, check the
//! caller may act on the target, perform the store operation, respond.

use serde::Serialize;

pub mod follows;
pub mod health;
pub mod likes;
pub mod medias;
pub mod tweets;
pub mod users;

/// Plain success envelope.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    /// Always `true` on success.
    pub result: bool,
}

impl ResultResponse {
    /// A successful result.
    #[must_use]
    pub const fn success() -> Self {
        Self { result: true }
    }
}
