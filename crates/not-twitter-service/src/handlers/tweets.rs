//! Tweet handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use not_twitter_core::{MediaId, Tweet, TweetId};
use not_twitter_store::Store;

use crate::auth::ApiKeyUser;
use crate::error::ApiError;
use crate::handlers::ResultResponse;
use crate::state::AppState;

/// Create tweet request.
#[derive(Debug, Deserialize)]
pub struct CreateTweetRequest {
    /// Tweet text.
    pub tweet_data: String,
    /// IDs of previously uploaded media to attach.
    #[serde(default)]
    pub tweet_media_ids: Option<Vec<MediaId>>,
}

/// Tweet created response.
#[derive(Debug, Serialize)]
pub struct TweetCreatedResponse {
    /// Always `true`.
    pub result: bool,
    /// ID of the new tweet.
    pub tweet_id: TweetId,
}

/// Tweet feed response.
#[derive(Debug, Serialize)]
pub struct TweetsResponse {
    /// Always `true`.
    pub result: bool,
    /// Tweets, newest first.
    pub tweets: Vec<Tweet>,
}

/// Load a tweet or fail with not-found.
pub(crate) async fn find_tweet(state: &AppState, tweet_id: TweetId) -> Result<Tweet, ApiError> {
    state
        .store
        .get_tweet_by_id(tweet_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tweet with id {tweet_id} does not exist")))
}

/// List every tweet, newest first.
pub async fn list_tweets(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(_caller): ApiKeyUser,
) -> Result<Json<TweetsResponse>, ApiError> {
    let tweets = state.store.get_all_tweets().await?;

    Ok(Json(TweetsResponse {
        result: true,
        tweets,
    }))
}

/// Post a new tweet as the caller.
pub async fn post_tweet(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(author): ApiKeyUser,
    Json(body): Json<CreateTweetRequest>,
) -> Result<(StatusCode, Json<TweetCreatedResponse>), ApiError> {
    let media_ids = body.tweet_media_ids.unwrap_or_default();

    let tweet_id = state
        .store
        .create_tweet(&author.user, &body.tweet_data, &media_ids)
        .await?;

    tracing::info!(
        user_id = %author.id(),
        tweet_id = %tweet_id,
        media_count = media_ids.len(),
        "Tweet created"
    );

    Ok((
        StatusCode::CREATED,
        Json(TweetCreatedResponse {
            result: true,
            tweet_id,
        }),
    ))
}

/// Delete one of the caller's own tweets.
pub async fn delete_tweet(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(caller): ApiKeyUser,
    Path(tweet_id): Path<TweetId>,
) -> Result<Json<ResultResponse>, ApiError> {
    let tweet = find_tweet(&state, tweet_id).await?;

    if caller.id() != tweet.author_id() {
        tracing::warn!(
            user_id = %caller.id(),
            tweet_id = %tweet_id,
            "Rejected delete of another user's tweet"
        );
        return Err(ApiError::Forbidden(
            "Api-key for tweet's author must be provided to delete tweet".into(),
        ));
    }

    state.store.delete_tweet(&tweet).await?;

    tracing::info!(user_id = %caller.id(), tweet_id = %tweet_id, "Tweet deleted");

    Ok(Json(ResultResponse::success()))
}
