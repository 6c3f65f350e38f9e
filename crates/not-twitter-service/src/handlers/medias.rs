//! Media upload and download handlers.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use not_twitter_core::MediaId;
use not_twitter_store::Store;

use crate::auth::ApiKeyUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Media uploaded response.
#[derive(Debug, Serialize)]
pub struct MediaUploadedResponse {
    /// Always `true`.
    pub result: bool,
    /// ID of the stored media.
    pub media_id: MediaId,
}

/// Upload a media file. The returned ID can be attached to a new tweet.
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(caller): ApiKeyUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaUploadedResponse>), ApiError> {
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            data = Some(bytes);
            break;
        }
    }

    let data = data.ok_or_else(|| {
        ApiError::BadRequest(format!("Multipart field '{UPLOAD_FIELD}' is required"))
    })?;

    let media_id = state.store.add_media(&data).await?;

    tracing::info!(
        user_id = %caller.id(),
        media_id = %media_id,
        size = data.len(),
        "Media uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(MediaUploadedResponse {
            result: true,
            media_id,
        }),
    ))
}

/// Download a media file. No authentication required.
pub async fn download_media(
    State(state): State<Arc<AppState>>,
    Path(media_id): Path<MediaId>,
) -> Result<Response, ApiError> {
    let media = state
        .store
        .get_media_by_id(media_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No media with ID {media_id}")))?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        media.data,
    )
        .into_response())
}
