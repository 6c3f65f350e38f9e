//! Common test utilities for not-twitter integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use not_twitter_core::{Profile, TweetId};
use not_twitter_service::{create_router, AppState, ServiceConfig};
use not_twitter_store::{SqliteStore, Store};

/// API key of the first seeded user.
pub const KEY_1: &str = "test_key_1";
/// API key of the second seeded user.
pub const KEY_2: &str = "test_key_2";

/// The `api-key` header name.
pub fn api_key_header() -> HeaderName {
    HeaderName::from_static("api-key")
}

/// Header value for an API key.
pub fn key(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).expect("Invalid header value")
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle on the store for assertions.
    pub store: Arc<SqliteStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// Profile owning [`KEY_1`].
    pub user_1: Profile,
    /// Profile owning [`KEY_2`].
    pub user_2: Profile,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and two users.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteStore::open(temp_dir.path().join("test.db"))
            .await
            .expect("Failed to open store");

        let mut seed_users = BTreeMap::new();
        seed_users.insert(KEY_1.to_string(), "Test_User_1".to_string());
        seed_users.insert(KEY_2.to_string(), "Test_User_2".to_string());
        store
            .seed_users(&seed_users)
            .await
            .expect("Failed to seed users");

        let user_1 = store
            .get_user_by_api_key(KEY_1)
            .await
            .expect("Failed to load user")
            .expect("User 1 missing");
        let user_2 = store
            .get_user_by_api_key(KEY_2)
            .await
            .expect("Failed to load user")
            .expect("User 2 missing");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_url: format!("sqlite://{}", temp_dir.path().join("test.db").display()),
            database_max_connections: 1,
            seed_users,
            static_dir: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let store = Arc::new(store);
        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
            user_1,
            user_2,
        }
    }

    /// Post a tweet through the API and return its ID.
    pub async fn post_tweet(&self, api_key: &str, text: &str) -> TweetId {
        let response = self
            .server
            .post("/api/tweets")
            .add_header(api_key_header(), key(api_key))
            .json(&json!({ "tweet_data": text }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        TweetId::new(body["tweet_id"].as_i64().expect("tweet_id missing"))
    }

    /// Fetch the tweet feed as `api_key`.
    pub async fn tweets(&self, api_key: &str) -> Vec<Value> {
        let response = self
            .server
            .get("/api/tweets")
            .add_header(api_key_header(), key(api_key))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        body["tweets"].as_array().cloned().unwrap_or_default()
    }
}
