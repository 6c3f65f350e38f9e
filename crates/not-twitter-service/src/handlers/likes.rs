//! Like handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use not_twitter_core::TweetId;
use not_twitter_store::Store;

use crate::auth::ApiKeyUser;
use crate::error::ApiError;
use crate::handlers::tweets::find_tweet;
use crate::handlers::ResultResponse;
use crate::state::AppState;

/// Like a tweet. Authors can not like their own tweets.
pub async fn like_tweet(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(caller): ApiKeyUser,
    Path(tweet_id): Path<TweetId>,
) -> Result<Json<ResultResponse>, ApiError> {
    let tweet = find_tweet(&state, tweet_id).await?;

    if caller.id() == tweet.author_id() {
        return Err(ApiError::Forbidden("Can not like self own tweets".into()));
    }

    if tweet.is_liked_by(caller.id()) {
        tracing::debug!(user_id = %caller.id(), tweet_id = %tweet_id, "Tweet already liked");
        return Ok(Json(ResultResponse::success()));
    }

    state.store.add_like(&caller.user, &tweet).await?;

    tracing::info!(user_id = %caller.id(), tweet_id = %tweet_id, "Tweet liked");

    Ok(Json(ResultResponse::success()))
}

/// Remove the caller's like from a tweet.
pub async fn unlike_tweet(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(caller): ApiKeyUser,
    Path(tweet_id): Path<TweetId>,
) -> Result<Json<ResultResponse>, ApiError> {
    let tweet = find_tweet(&state, tweet_id).await?;

    if caller.id() == tweet.author_id() {
        return Err(ApiError::Forbidden(
            "Can not remove likes from self own tweets".into(),
        ));
    }

    if !tweet.is_liked_by(caller.id()) {
        tracing::debug!(user_id = %caller.id(), tweet_id = %tweet_id, "Tweet was not liked");
        return Ok(Json(ResultResponse::success()));
    }

    state.store.remove_like(&caller.user, &tweet).await?;

    tracing::info!(user_id = %caller.id(), tweet_id = %tweet_id, "Tweet unliked");

    Ok(Json(ResultResponse::success()))
}
