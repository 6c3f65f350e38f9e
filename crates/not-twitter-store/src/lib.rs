//! SQLite storage layer for not-twitter.
//!
//! This crate provides persistent storage for users, API keys, tweets, likes,
//! following edges, and uploaded media using SQLite through `sqlx`.
//!
//! # Architecture
//!
//! The schema consists of the following tables:
//!
//! - `users`: User records, keyed by generated `id`
//! - `users_by_keys`: API key to user mapping, keyed by `api_key`
//! - `followings`: Directed following edges, keyed by `(followed_id, follower_id)`
//! - `tweets`: Tweets, keyed by generated `id`
//! - `likes`: Likes, keyed by `(tweet_id, user_id)`
//! - `medias`: Media blobs, keyed by generated `id`
//!
//! Every foreign key cascades on delete, so removing a user or a tweet removes
//! the rows that depend on it.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use not_twitter_store::{SqliteStore, Store};
//!
//! # async fn run() -> not_twitter_store::Result<()> {
//! let store = SqliteStore::open("/tmp/not-twitter.db").await?;
//!
//! let mut users = BTreeMap::new();
//! users.insert("test".to_string(), "Test User".to_string());
//! store.seed_users(&users).await?;
//!
//! let profile = store.get_user_by_api_key("test").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use sqlite::SqliteStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use not_twitter_core::{Media, MediaId, Profile, Tweet, TweetId, User, UserId};

/// The storage trait defining all database operations.
///
/// Each operation runs in its own transaction and commits before returning;
/// no transaction is shared between calls.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Create a user and API key for every key in `users` not already present.
    ///
    /// `users` maps API key to display name. Existing keys are left untouched,
    /// so calling this repeatedly with the same mapping is a no-op.
    ///
    /// Returns the number of users created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn seed_users(&self, users: &BTreeMap<String, String>) -> Result<usize>;

    /// Get the user owning an API key, with followers and following loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_user_by_api_key(&self, api_key: &str) -> Result<Option<Profile>>;

    /// Get a user by ID, with followers and following loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_user_by_id(&self, user_id: UserId) -> Result<Option<Profile>>;

    // =========================================================================
    // Tweet Operations
    // =========================================================================

    /// Create a tweet and attach the given media to it.
    ///
    /// Media IDs that do not exist are ignored. Returns the new tweet's ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_tweet(
        &self,
        author: &User,
        content: &str,
        media_ids: &[MediaId],
    ) -> Result<TweetId>;

    /// List an author's tweets, newest first, with likes loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_tweets_by_author(&self, author_id: UserId) -> Result<Vec<Tweet>>;

    /// Get a tweet by ID, with likes loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_tweet_by_id(&self, tweet_id: TweetId) -> Result<Option<Tweet>>;

    /// List all tweets, newest first, with likes loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_all_tweets(&self) -> Result<Vec<Tweet>>;

    /// Delete a tweet by ID. Its likes and attached media are deleted with it.
    ///
    /// Deleting a tweet that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn delete_tweet_by_id(&self, tweet_id: TweetId) -> Result<()>;

    /// Delete a previously loaded tweet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn delete_tweet(&self, tweet: &Tweet) -> Result<()> {
        self.delete_tweet_by_id(tweet.id).await
    }

    // =========================================================================
    // Media Operations
    // =========================================================================

    /// Store a media blob not yet attached to any tweet. Returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn add_media(&self, data: &[u8]) -> Result<MediaId>;

    /// Get a media blob by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_media_by_id(&self, media_id: MediaId) -> Result<Option<Media>>;

    // =========================================================================
    // Like Operations
    // =========================================================================

    /// Record that `user` likes `tweet`, capturing the user's current name.
    ///
    /// Liking the same tweet twice leaves a single like.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn add_like(&self, user: &User, tweet: &Tweet) -> Result<()>;

    /// Remove `user`'s like from `tweet`. Other likes are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn remove_like(&self, user: &User, tweet: &Tweet) -> Result<()>;

    // =========================================================================
    // Following Operations
    // =========================================================================

    /// Record that `follower` follows `followed`.
    ///
    /// Following the same user twice leaves a single edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn add_following(&self, followed: &User, follower: &User) -> Result<()>;

    /// Remove the edge `follower` → `followed`. Other edges are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn remove_following(&self, followed: &User, follower: &User) -> Result<()>;

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Check that the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    async fn ping(&self) -> Result<()>;
}
