//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{unique_username, TestApp};

/// Register, then log in with the same credentials
#[tokio::test]
async fn test_register_then_login_returns_same_id() {
    let app = TestApp::new();

    let registered = app.register("alice", "secret").await;
    assert_eq!(registered.status, StatusCode::OK);
    assert_eq!(registered.json()["status"], "ok");
    let user_id = registered.id("user_id");

    let logged_in = app.login("alice", "secret").await;
    assert_eq!(logged_in.status, StatusCode::OK);
    assert_eq!(logged_in.id("user_id"), user_id);
}

/// Wrong password and unknown user produce the same response
#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("alice", "secret").await;

    let wrong_password = app.login("alice", "wrong").await;
    let unknown_user = app.login("mallory", "secret").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, r#"{"error":"invalid credentials"}"#);
    assert_eq!(unknown_user.status, wrong_password.status);
    assert_eq!(unknown_user.body, wrong_password.body);
}

/// Success bodies are JSON with the default content type
#[tokio::test]
async fn test_responses_are_json() {
    let app = TestApp::new();

    let response = app.register(&unique_username(), "pw").await;

    assert_eq!(response.content_type.as_deref(), Some("application/json"));
}

/// Sequential registrations get distinct ids
#[tokio::test]
async fn test_ids_are_distinct() {
    let app = TestApp::new();

    let first = app.register("first", "pw").await.id("user_id");
    let second = app.register("second", "pw").await.id("user_id");

    assert_ne!(first, second);
    assert_eq!(app.users.len(), 2);
}

/// Registering a taken username is a conflict
#[tokio::test]
async fn test_duplicate_username_is_409() {
    let app = TestApp::new();
    app.register("alice", "secret").await;

    let response = app.register("alice", "other").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.users.len(), 1);
}

/// Empty username fails domain validation
#[tokio::test]
async fn test_empty_username_is_400() {
    let app = TestApp::new();

    let response = app.register("", "secret").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.users.is_empty());
}

/// Body that is not the expected JSON shape
#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = TestApp::new();

    let response = app.post_json("/users/register", r#"{"username":"alice"}"#).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.post_json("/users/login", "not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

/// Routes are method-specific
#[tokio::test]
async fn test_wrong_method_is_404() {
    let app = TestApp::new();

    let response = app.get("/users/register").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, r#"{"error":"not found"}"#);
}

/// Concurrent logins against one stored hash each get the right answer
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logins() {
    let app = std::sync::Arc::new(TestApp::new());
    let user_id = app.register("alice", "secret").await.id("user_id");

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let password = if i % 2 == 0 { "secret" } else { "nope" };
                (i, app.login("alice", password).await)
            })
        })
        .collect();

    for task in tasks {
        let (i, response) = task.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(response.id("user_id"), user_id);
        } else {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        }
    }
}
