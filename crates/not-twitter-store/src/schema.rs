//! Database schema definitions and migrations.
//!
//! The schema is created by the embedded migrations in `migrations/`, applied
//! every time a store is opened.

use sqlx::migrate::Migrator;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Table names.
pub mod table {
    /// User records, keyed by generated `id`.
    pub const USERS: &str = "users";

    /// API key to user mapping, keyed by `api_key`.
    pub const USERS_BY_KEYS: &str = "users_by_keys";

    /// Following edges, keyed by `(followed_id, follower_id)`.
    pub const FOLLOWINGS: &str = "followings";

    /// Tweets, keyed by generated `id`.
    pub const TWEETS: &str = "tweets";

    /// Likes, keyed by `(tweet_id, user_id)`.
    pub const LIKES: &str = "likes";

    /// Uploaded media blobs, keyed by generated `id`.
    pub const MEDIAS: &str = "medias";
}

/// Returns all table names created by the migrations.
#[must_use]
pub fn all_tables() -> Vec<&'static str> {
    vec![
        table::USERS,
        table::USERS_BY_KEYS,
        table::FOLLOWINGS,
        table::TWEETS,
        table::LIKES,
        table::MEDIAS,
    ]
}
