//! Not-twitter HTTP API service.
//!
//! This crate provides the HTTP API for a small microblogging service:
//!
//! - Posting, listing, and deleting tweets
//! - Uploading media and attaching it to tweets
//! - Liking tweets and following users
//! - User profiles with followers and following
//!
//! # Authentication
//!
//! Every API route except media download requires an `api-key` header that
//! resolves to a seeded user.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // get_me only needs the extractor

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use seed::bootstrap_users;
pub use state::AppState;
