//! Follow handlers.
//!
//! The routes keep the verbs and paths the frontend already calls:
//! following is `DELETE /api/users/{id}/follow` and unfollowing is
//! `DELETE /api/tweets/{id}/follow`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use not_twitter_core::{Profile, UserId};
use not_twitter_store::Store;

use crate::auth::ApiKeyUser;
use crate::error::ApiError;
use crate::handlers::ResultResponse;
use crate::state::AppState;

async fn find_user(state: &AppState, user_id: UserId) -> Result<Profile, ApiError> {
    state
        .store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {user_id} does not exist")))
}

/// Follow a user.
pub async fn follow_user(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(follower): ApiKeyUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ResultResponse>, ApiError> {
    let followed = find_user(&state, user_id).await?;

    if follower.id() == followed.id() {
        return Err(ApiError::Forbidden("Can not follow yourself".into()));
    }

    if follower.follows(followed.id()) {
        tracing::debug!(
            follower_id = %follower.id(),
            followed_id = %followed.id(),
            "Already following"
        );
        return Ok(Json(ResultResponse::success()));
    }

    state
        .store
        .add_following(&followed.user, &follower.user)
        .await?;

    tracing::info!(
        follower_id = %follower.id(),
        followed_id = %followed.id(),
        "User followed"
    );

    Ok(Json(ResultResponse::success()))
}

/// Stop following a user.
pub async fn unfollow_user(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(follower): ApiKeyUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ResultResponse>, ApiError> {
    let followed = find_user(&state, user_id).await?;

    if follower.id() == followed.id() {
        return Err(ApiError::Forbidden("Can not unfollow yourself".into()));
    }

    if !follower.follows(followed.id()) {
        tracing::debug!(
            follower_id = %follower.id(),
            followed_id = %followed.id(),
            "Not following"
        );
        return Ok(Json(ResultResponse::success()));
    }

    state
        .store
        .remove_following(&followed.user, &follower.user)
        .await?;

    tracing::info!(
        follower_id = %follower.id(),
        followed_id = %followed.id(),
        "User unfollowed"
    );

    Ok(Json(ResultResponse::success()))
}
