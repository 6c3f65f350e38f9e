//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{follows, health, likes, medias, tweets, users};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /api/medias/:id` - Download media
///
/// ## Tweets (api-key auth)
/// - `GET /api/tweets` - List all tweets, newest first
/// - `POST /api/tweets` - Post a tweet
/// - `DELETE /api/tweets/:id` - Delete own tweet
/// - `POST /api/tweets/:id/likes` - Like a tweet
/// - `DELETE /api/tweets/:id/likes` - Remove a like
///
/// ## Users (api-key auth)
/// - `GET /api/users/me` - Caller's profile
/// - `GET /api/users/:id` - Any user's profile
/// - `DELETE /api/users/:id/follow` - Follow a user
/// - `DELETE /api/tweets/:id/follow` - Unfollow a user
///
/// ## Media (api-key auth)
/// - `POST /api/medias` - Upload media (multipart field `file`)
///
/// When `STATIC_DIR` is configured, every other path is served from that
/// directory, falling back to its `index.html`.
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let static_dir = state.config.static_dir.clone();

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // The unfollow route lives under /tweets with a user id, which is what
    // the frontend calls.
    let api_routes = Router::new()
        // Tweets
        .route("/tweets", get(tweets::list_tweets).post(tweets::post_tweet))
        .route("/tweets/:id", delete(tweets::delete_tweet))
        .route(
            "/tweets/:id/likes",
            post(likes::like_tweet).delete(likes::unlike_tweet),
        )
        .route("/tweets/:id/follow", delete(follows::unfollow_user))
        // Users
        .route("/users/me", get(users::get_me))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/follow", delete(follows::follow_user))
        // Media
        .route("/medias", post(medias::upload_media))
        .route("/medias/:id", get(medias::download_media))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    let mut router = Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        .nest("/api", api_routes);

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
