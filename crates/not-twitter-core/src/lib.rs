//! Core types for not-twitter.
//!
//! This crate provides the domain types shared by the store and the HTTP service:
//!
//! - **Identifiers**: `UserId`, `TweetId`, `MediaId`
//! - **Users**: `User`, `Profile`
//! - **Tweets**: `Tweet`, `Like`, attachment URL helpers
//! - **Media**: `Media`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod media;
pub mod tweet;
pub mod user;

pub use ids::{MediaId, TweetId, UserId};
pub use media::Media;
pub use tweet::{attachment_url, attachment_urls, Like, Tweet, MEDIA_URL_PREFIX};
pub use user::{Profile, User, MAX_API_KEY_LEN, MAX_NAME_LEN};
