//! Uploaded media.

use crate::{MediaId, TweetId};

/// An uploaded media blob.
///
/// Media is stored as opaque bytes. `tweet_id` is set once the media is
/// attached to a tweet; deleting that tweet deletes the media with it.
#[derive(Clone, PartialEq, Eq)]
pub struct Media {
    /// Media ID.
    pub id: MediaId,
    /// Raw bytes as uploaded.
    pub data: Vec<u8>,
    /// The tweet this media is attached to, if any.
    pub tweet_id: Option<TweetId>,
}

impl std::fmt::Debug for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Media")
            .field("id", &self.id)
            .field("len", &self.data.len())
            .field("tweet_id", &self.tweet_id)
            .finish()
    }
}
