//! SQLite storage implementation.
//!
//! This module provides the `SqliteStore` implementation of the `Store` trait.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use not_twitter_core::{
    attachment_urls, Like, Media, MediaId, Profile, Tweet, TweetId, User, UserId,
};

use crate::error::Result;
use crate::schema::MIGRATOR;
use crate::Store;

/// Default pool size when opening a database file directly.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// ============================================================================
// Row Types
// ============================================================================

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(FromRow)]
struct TweetRow {
    id: i64,
    content: String,
    attachments: Option<Json<Vec<String>>>,
    author_id: i64,
    author_name: String,
}

impl TweetRow {
    fn into_tweet(self, likes: Vec<Like>) -> Tweet {
        Tweet {
            id: TweetId::new(self.id),
            content: self.content,
            attachments: self.attachments.map(|Json(urls)| urls).unwrap_or_default(),
            author: User {
                id: UserId::new(self.author_id),
                name: self.author_name,
            },
            likes,
        }
    }
}

#[derive(FromRow)]
struct LikeRow {
    tweet_id: i64,
    user_id: i64,
    name: String,
}

#[derive(FromRow)]
struct MediaRow {
    id: i64,
    media_data: Vec<u8>,
    tweet_id: Option<i64>,
}

impl From<MediaRow> for Media {
    fn from(row: MediaRow) -> Self {
        Self {
            id: MediaId::new(row.id),
            data: row.media_data,
            tweet_id: row.tweet_id.map(TweetId::new),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// SQLite-backed storage implementation.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to the database at `url` and apply migrations.
    ///
    /// In-memory databases are limited to a single connection, since every
    /// connection to `:memory:` opens a separate database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or a migration fails.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let options = if in_memory {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        };

        let pool = pool_options.connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Open or create a database file at the given path and apply migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a migration fails.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        MIGRATOR.run(&pool).await?;
        tracing::debug!("Database migrations applied");
        Ok(Self { pool })
    }

    /// Close every pooled connection. Pending operations finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Load both sides of the following relation for a user.
async fn load_profile(conn: &mut SqliteConnection, user: UserRow) -> Result<Profile> {
    let followers = sqlx::query_as::<_, UserRow>(
        "SELECT u.id, u.name FROM followings f \
         JOIN users u ON u.id = f.follower_id \
         WHERE f.followed_id = ? ORDER BY u.id",
    )
    .bind(user.id)
    .fetch_all(&mut *conn)
    .await?;

    let following = sqlx::query_as::<_, UserRow>(
        "SELECT u.id, u.name FROM followings f \
         JOIN users u ON u.id = f.followed_id \
         WHERE f.follower_id = ? ORDER BY u.id",
    )
    .bind(user.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Profile {
        user: user.into(),
        followers: followers.into_iter().map(User::from).collect(),
        following: following.into_iter().map(User::from).collect(),
    })
}

/// Pair tweet rows with their likes, keeping the tweet order.
fn assemble_tweets(rows: Vec<TweetRow>, likes: Vec<LikeRow>) -> Vec<Tweet> {
    let mut likes_by_tweet: HashMap<i64, Vec<Like>> = HashMap::new();
    for like in likes {
        likes_by_tweet.entry(like.tweet_id).or_default().push(Like {
            user_id: UserId::new(like.user_id),
            name: like.name,
        });
    }

    rows.into_iter()
        .map(|row| {
            let likes = likes_by_tweet.remove(&row.id).unwrap_or_default();
            row.into_tweet(likes)
        })
        .collect()
}

#[async_trait]
impl Store for SqliteStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    async fn seed_users(&self, users: &BTreeMap<String, String>) -> Result<usize> {
        if users.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut created = 0;

        for (api_key, name) in users {
            let existing: Option<i64> =
                sqlx::query_scalar("SELECT user_id FROM users_by_keys WHERE api_key = ?")
                    .bind(api_key)
                    .fetch_optional(&mut *tx)
                    .await?;

            if existing.is_some() {
                continue;
            }

            let user_id = sqlx::query("INSERT INTO users (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();

            sqlx::query("INSERT INTO users_by_keys (api_key, user_id) VALUES (?, ?)")
                .bind(api_key)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            tracing::debug!(user_id = %user_id, name = %name, "Seeded user");
            created += 1;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn get_user_by_api_key(&self, api_key: &str) -> Result<Option<Profile>> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.name FROM users_by_keys k \
             JOIN users u ON u.id = k.user_id \
             WHERE k.api_key = ?",
        )
        .bind(api_key)
        .fetch_optional(&mut *tx)
        .await?;

        let profile = match user {
            Some(user) => Some(load_profile(&mut *tx, user).await?),
            None => None,
        };

        tx.commit().await?;
        Ok(profile)
    }

    async fn get_user_by_id(&self, user_id: UserId) -> Result<Option<Profile>> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserRow>("SELECT id, name FROM users WHERE id = ?")
            .bind(user_id.get())
            .fetch_optional(&mut *tx)
            .await?;

        let profile = match user {
            Some(user) => Some(load_profile(&mut *tx, user).await?),
            None => None,
        };

        tx.commit().await?;
        Ok(profile)
    }

    // =========================================================================
    // Tweet Operations
    // =========================================================================

    async fn create_tweet(
        &self,
        author: &User,
        content: &str,
        media_ids: &[MediaId],
    ) -> Result<TweetId> {
        let mut tx = self.pool.begin().await?;

        let tweet_id = sqlx::query(
            "INSERT INTO tweets (content, author_id, attachments) VALUES (?, ?, ?)",
        )
        .bind(content)
        .bind(author.id.get())
        .bind(Json(attachment_urls(media_ids)))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        if !media_ids.is_empty() {
            let mut builder = QueryBuilder::<Sqlite>::new("UPDATE medias SET tweet_id = ");
            builder.push_bind(tweet_id);
            builder.push(" WHERE id IN (");
            let mut ids = builder.separated(", ");
            for media_id in media_ids {
                ids.push_bind(media_id.get());
            }
            ids.push_unseparated(")");

            let attached = builder.build().execute(&mut *tx).await?.rows_affected();
            if usize::try_from(attached).unwrap_or(usize::MAX) < media_ids.len() {
                tracing::debug!(
                    tweet_id = %tweet_id,
                    requested = media_ids.len(),
                    attached = attached,
                    "Some media IDs did not exist and were skipped"
                );
            }
        }

        tx.commit().await?;
        Ok(TweetId::new(tweet_id))
    }

    async fn get_tweets_by_author(&self, author_id: UserId) -> Result<Vec<Tweet>> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, TweetRow>(
            "SELECT t.id, t.content, t.attachments, t.author_id, u.name AS author_name \
             FROM tweets t JOIN users u ON u.id = t.author_id \
             WHERE t.author_id = ? ORDER BY t.id DESC",
        )
        .bind(author_id.get())
        .fetch_all(&mut *tx)
        .await?;

        let likes = sqlx::query_as::<_, LikeRow>(
            "SELECT l.tweet_id, l.user_id, l.name \
             FROM likes l JOIN tweets t ON t.id = l.tweet_id \
             WHERE t.author_id = ? ORDER BY l.rowid",
        )
        .bind(author_id.get())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(assemble_tweets(rows, likes))
    }

    async fn get_tweet_by_id(&self, tweet_id: TweetId) -> Result<Option<Tweet>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TweetRow>(
            "SELECT t.id, t.content, t.attachments, t.author_id, u.name AS author_name \
             FROM tweets t JOIN users u ON u.id = t.author_id \
             WHERE t.id = ?",
        )
        .bind(tweet_id.get())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let likes = sqlx::query_as::<_, LikeRow>(
            "SELECT tweet_id, user_id, name FROM likes WHERE tweet_id = ? ORDER BY rowid",
        )
        .bind(tweet_id.get())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(assemble_tweets(vec![row], likes).pop())
    }

    async fn get_all_tweets(&self) -> Result<Vec<Tweet>> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, TweetRow>(
            "SELECT t.id, t.content, t.attachments, t.author_id, u.name AS author_name \
             FROM tweets t JOIN users u ON u.id = t.author_id \
             ORDER BY t.id DESC",
        )
        .fetch_all(&mut *tx)
        .await?;

        let likes = sqlx::query_as::<_, LikeRow>(
            "SELECT tweet_id, user_id, name FROM likes ORDER BY rowid",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(assemble_tweets(rows, likes))
    }

    async fn delete_tweet_by_id(&self, tweet_id: TweetId) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM tweets WHERE id = ?")
            .bind(tweet_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(tweet_id = %tweet_id, deleted = deleted, "Tweet delete executed");
        Ok(())
    }

    // =========================================================================
    // Media Operations
    // =========================================================================

    async fn add_media(&self, data: &[u8]) -> Result<MediaId> {
        let media_id = sqlx::query("INSERT INTO medias (media_data) VALUES (?)")
            .bind(data)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(MediaId::new(media_id))
    }

    async fn get_media_by_id(&self, media_id: MediaId) -> Result<Option<Media>> {
        let row = sqlx::query_as::<_, MediaRow>(
            "SELECT id, media_data, tweet_id FROM medias WHERE id = ?",
        )
        .bind(media_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Media::from))
    }

    // =========================================================================
    // Like Operations
    // =========================================================================

    async fn add_like(&self, user: &User, tweet: &Tweet) -> Result<()> {
        sqlx::query(
            "INSERT INTO likes (tweet_id, user_id, name) VALUES (?, ?, ?) \
             ON CONFLICT (tweet_id, user_id) DO NOTHING",
        )
        .bind(tweet.id.get())
        .bind(user.id.get())
        .bind(&user.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_like(&self, user: &User, tweet: &Tweet) -> Result<()> {
        sqlx::query("DELETE FROM likes WHERE tweet_id = ? AND user_id = ?")
            .bind(tweet.id.get())
            .bind(user.id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Following Operations
    // =========================================================================

    async fn add_following(&self, followed: &User, follower: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO followings (followed_id, follower_id) VALUES (?, ?) \
             ON CONFLICT (followed_id, follower_id) DO NOTHING",
        )
        .bind(followed.id.get())
        .bind(follower.id.get())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_following(&self, followed: &User, follower: &User) -> Result<()> {
        sqlx::query("DELETE FROM followings WHERE followed_id = ? AND follower_id = ?")
            .bind(followed.id.get())
            .bind(follower.id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
