//! API key authentication.
//!
//! Callers identify themselves with the `api-key` header. Keys are issued out
//! of band by seeding (see [`crate::seed`]) and resolved to a user on every
//! request.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use not_twitter_core::Profile;
use not_twitter_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Message returned for a missing or unknown API key.
pub const AUTHENTICATION_REQUIRED: &str = "Api-key for existing user is required";

/// Resolve an API key to its user.
///
/// # Errors
///
/// Returns `ApiError::Unauthenticated` if no user owns `api_key`, or
/// `ApiError::Internal` if the lookup fails.
pub async fn check_api_key<S>(store: &S, api_key: &str) -> Result<Profile, ApiError>
where
    S: Store + ?Sized,
{
    match store.get_user_by_api_key(api_key).await? {
        Some(profile) => Ok(profile),
        None => {
            tracing::debug!("Unknown API key presented");
            Err(ApiError::Unauthenticated(AUTHENTICATION_REQUIRED.into()))
        }
    }
}

/// The authenticated caller, with followers and following loaded.
#[derive(Debug, Clone)]
pub struct ApiKeyUser(pub Profile);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ApiKeyUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated(AUTHENTICATION_REQUIRED.into()))?;

        let profile = check_api_key(state.store.as_ref(), api_key).await?;
        Ok(Self(profile))
    }
}
