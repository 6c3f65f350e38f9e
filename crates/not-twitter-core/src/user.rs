//! User types.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Maximum length of a user's display name.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length of an API key.
pub const MAX_API_KEY_LEN: usize = 100;

/// A user as it appears inside other resources (tweet authors, follower lists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// A user together with both sides of the following relation.
///
/// Serializes flat: `{id, name, followers, following}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The user this profile belongs to.
    #[serde(flatten)]
    pub user: User,
    /// Users that follow this user.
    pub followers: Vec<User>,
    /// Users this user follows.
    pub following: Vec<User>,
}

impl Profile {
    /// The profile owner's ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.user.id
    }

    /// Whether this user follows `other`.
    #[must_use]
    pub fn follows(&self, other: UserId) -> bool {
        self.following.iter().any(|u| u.id == other)
    }
}
