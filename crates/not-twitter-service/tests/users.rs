//! User profile integration tests.

mod common;

use axum::http::StatusCode;
use common::{api_key_header, key, TestHarness, KEY_1, KEY_2};
use serde_json::{json, Value};

#[tokio::test]
async fn get_me_returns_own_profile() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/api/users/me")
        .add_header(api_key_header(), key(KEY_1))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "result": true,
            "user": {
                "id": harness.user_1.id().get(),
                "name": "Test_User_1",
                "followers": [],
                "following": [],
            }
        })
    );
}

#[tokio::test]
async fn get_me_with_unknown_key_fails() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/api/users/me")
        .add_header(api_key_header(), key("nope"))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn get_user_by_id() {
    let harness = TestHarness::new().await;
    let user_2_id = harness.user_2.id();

    let response = harness
        .server
        .get(&format!("/api/users/{user_2_id}"))
        .add_header(api_key_header(), key(KEY_1))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], user_2_id.get());
    assert_eq!(body["user"]["name"], "Test_User_2");
}

#[tokio::test]
async fn get_user_reflects_follows() {
    let harness = TestHarness::new().await;
    let user_1_id = harness.user_1.id();

    harness
        .server
        .delete(&format!("/api/users/{user_1_id}/follow"))
        .add_header(api_key_header(), key(KEY_2))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get(&format!("/api/users/{user_1_id}"))
        .add_header(api_key_header(), key(KEY_2))
        .await;
    let body: Value = response.json();
    assert_eq!(
        body["user"]["followers"],
        json!([{ "id": harness.user_2.id().get(), "name": "Test_User_2" }])
    );
}

#[tokio::test]
async fn get_missing_user_returns_not_found() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/api/users/404")
        .add_header(api_key_header(), key(KEY_1))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error_message"], "No user with ID 404");
}

#[tokio::test]
async fn get_user_with_invalid_id_is_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/api/users/abc")
        .add_header(api_key_header(), key(KEY_1))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
