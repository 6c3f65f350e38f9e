//! Follow integration tests.

mod common;

use axum::http::StatusCode;
use common::{api_key_header, key, TestHarness, KEY_1, KEY_2};
use serde_json::{json, Value};

async fn profile(harness: &TestHarness, api_key: &str) -> Value {
    let response = harness
        .server
        .get("/api/users/me")
        .add_header(api_key_header(), key(api_key))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["user"].clone()
}

#[tokio::test]
async fn follow_then_unfollow_user() {
    let harness = TestHarness::new().await;
    let user_2_id = harness.user_2.id();

    let response = harness
        .server
        .delete(&format!("/api/users/{user_2_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "result": true }));

    let me = profile(&harness, KEY_1).await;
    assert_eq!(
        me["following"],
        json!([{ "id": user_2_id.get(), "name": "Test_User_2" }])
    );
    assert_eq!(me["followers"], json!([]));

    let other = profile(&harness, KEY_2).await;
    assert_eq!(
        other["followers"],
        json!([{ "id": harness.user_1.id().get(), "name": "Test_User_1" }])
    );

    harness
        .server
        .delete(&format!("/api/tweets/{user_2_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await
        .assert_status_ok();

    let me = profile(&harness, KEY_1).await;
    assert_eq!(me["following"], json!([]));
    let other = profile(&harness, KEY_2).await;
    assert_eq!(other["followers"], json!([]));
}

#[tokio::test]
async fn following_twice_keeps_one_edge() {
    let harness = TestHarness::new().await;
    let user_2_id = harness.user_2.id();

    for _ in 0..2 {
        harness
            .server
            .delete(&format!("/api/users/{user_2_id}/follow"))
            .add_header(api_key_header(), key(KEY_1))
            .await
            .assert_status_ok();
    }

    let me = profile(&harness, KEY_1).await;
    assert_eq!(me["following"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn can_not_follow_yourself() {
    let harness = TestHarness::new().await;
    let user_1_id = harness.user_1.id();

    let response = harness
        .server
        .delete(&format!("/api/users/{user_1_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error_message"], "Can not follow yourself");

    let response = harness
        .server
        .delete(&format!("/api/tweets/{user_1_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error_message"], "Can not unfollow yourself");
}

#[tokio::test]
async fn follow_missing_user_returns_not_found() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .delete("/api/users/777/follow")
        .add_header(api_key_header(), key(KEY_1))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error_type"], "Not found error");
    assert_eq!(body["error_message"], "User with id 777 does not exist");
}

#[tokio::test]
async fn unfollow_only_removes_that_edge() {
    let harness = TestHarness::new().await;
    let user_1_id = harness.user_1.id();
    let user_2_id = harness.user_2.id();

    harness
        .server
        .delete(&format!("/api/users/{user_2_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await
        .assert_status_ok();
    harness
        .server
        .delete(&format!("/api/users/{user_1_id}/follow"))
        .add_header(api_key_header(), key(KEY_2))
        .await
        .assert_status_ok();

    harness
        .server
        .delete(&format!("/api/tweets/{user_2_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await
        .assert_status_ok();

    let me = profile(&harness, KEY_1).await;
    assert_eq!(me["following"], json!([]));
    assert_eq!(me["followers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unfollow_without_follow_is_a_no_op() {
    let harness = TestHarness::new().await;
    let user_1_id = harness.user_1.id();

    // User 1 follows user 2, user 2 follows nobody.
    let user_2_id = harness.user_2.id();
    harness
        .server
        .delete(&format!("/api/users/{user_2_id}/follow"))
        .add_header(api_key_header(), key(KEY_1))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .delete(&format!("/api/tweets/{user_1_id}/follow"))
        .add_header(api_key_header(), key(KEY_2))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "result": true }));

    let me = profile(&harness, KEY_1).await;
    assert_eq!(me["following"].as_array().unwrap().len(), 1);
    assert_eq!(me["followers"], json!([]));
}
