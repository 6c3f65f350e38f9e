//! Tweet and like types.

use serde::{Deserialize, Serialize};

use crate::{MediaId, TweetId, User, UserId};

/// Path prefix of the media download endpoint, used to build attachment URLs.
pub const MEDIA_URL_PREFIX: &str = "api/medias/";

/// Build the display URL for an attached media item.
///
/// Attachment URLs are a display convenience. The authoritative link between
/// a tweet and its media is the media row's `tweet_id`.
#[must_use]
pub fn attachment_url(media_id: MediaId) -> String {
    format!("{MEDIA_URL_PREFIX}{media_id}")
}

/// Build the attachment list stored on a new tweet.
///
/// A tweet without media gets an empty list, never `null`.
#[must_use]
pub fn attachment_urls(media_ids: &[MediaId]) -> Vec<String> {
    media_ids.iter().copied().map(attachment_url).collect()
}

/// A like on a tweet.
///
/// `name` is the liker's display name at the time of the like and is not
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    /// The user who liked the tweet.
    pub user_id: UserId,
    /// The liker's display name when the like was recorded.
    pub name: String,
}

/// A tweet with its author and likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet ID.
    pub id: TweetId,
    /// Text content.
    pub content: String,
    /// Attachment URLs of the media attached at creation.
    pub attachments: Vec<String>,
    /// The author.
    pub author: User,
    /// Likes on this tweet.
    pub likes: Vec<Like>,
}

impl Tweet {
    /// The author's user ID.
    #[must_use]
    pub fn author_id(&self) -> UserId {
        self.author.id
    }

    /// Whether `user_id` has liked this tweet.
    #[must_use]
    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }
}
