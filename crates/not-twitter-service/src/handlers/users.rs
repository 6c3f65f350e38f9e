//! User profile handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use not_twitter_core::{Profile, UserId};
use not_twitter_store::Store;

use crate::auth::ApiKeyUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Always `true`.
    pub result: bool,
    /// The profile with followers and following.
    pub user: Profile,
}

/// Get the caller's own profile.
pub async fn get_me(ApiKeyUser(profile): ApiKeyUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        result: true,
        user: profile,
    })
}

/// Get any user's profile by ID.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(_caller): ApiKeyUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with ID {user_id}")))?;

    Ok(Json(ProfileResponse {
        result: true,
        user: profile,
    }))
}
