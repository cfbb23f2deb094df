//! Message API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use chat_server::domain::MessageEncryptor;

use crate::common::TestApp;

/// Sending stores only ciphertext, which decrypts to the original text
#[tokio::test]
async fn test_send_message_stores_ciphertext() {
    let app = TestApp::new();
    let body = r#"{"sender_id":1,"receiver_id":2,"text":"meet at noon"}"#;

    let response = app.post_json("/messages/send", body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
    let message_id = response.id("message_id");

    let stored = app.messages.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.map(|id| id.as_i64()), Some(message_id));
    assert!(!stored[0].text.as_str().contains("meet at noon"));
    assert_eq!(stored[0].text.as_str().matches(':').count(), 2);
    assert_eq!(
        app.encryptor.decrypt(stored[0].text.as_str()).unwrap(),
        "meet at noon"
    );
}

/// The same text sent twice is encrypted under different nonces
#[tokio::test]
async fn test_identical_messages_differ_at_rest() {
    let app = TestApp::new();
    let body = r#"{"sender_id":1,"receiver_id":2,"text":"ping"}"#;

    let first = app.post_json("/messages/send", body).await.id("message_id");
    let second = app.post_json("/messages/send", body).await.id("message_id");

    assert_ne!(first, second);
    let stored = app.messages.all();
    assert_ne!(stored[0].text, stored[1].text);
}

/// Empty text fails domain validation
#[tokio::test]
async fn test_empty_text_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json("/messages/send", r#"{"sender_id":1,"receiver_id":2,"text":""}"#)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.messages.all().is_empty());
}

/// Missing fields are rejected before dispatch
#[tokio::test]
async fn test_missing_receiver_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json("/messages/send", r#"{"sender_id":1,"text":"hi"}"#)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
