//! Not-twitter Service - HTTP API for tweets, likes, follows, and media
//!
//! This is the main entry point for the not-twitter service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use not_twitter_service::{bootstrap_users, create_router, AppState, ServiceConfig};
use not_twitter_store::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,not_twitter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Not-twitter Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_url = %config.database_url,
        seed_users = config.seed_users.len(),
        static_dir = ?config.static_dir,
        "Service configuration loaded"
    );

    // Open the database and apply migrations
    tracing::info!(url = %config.database_url, "Opening SQLite store");
    let store = Arc::new(
        SqliteStore::connect(&config.database_url, config.database_max_connections).await?,
    );

    bootstrap_users(store.as_ref(), &config.seed_users).await?;

    // Build app state
    let state = AppState::new(Arc::clone(&store), config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down, closing database pool");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
