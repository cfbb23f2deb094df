//! Connection Acceptor Tests
//!
//! These talk raw HTTP/1.1 over TCP to a server bound on an ephemeral port.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use chat_server::startup::Application;

use crate::common::{test_settings, SpawnedApp, TestServices};

const IO_TIMEOUT: Duration = Duration::from_secs(5);

fn http_request(method: &str, path: &str, body: &str) -> String {
    format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

/// Send one request and read until the server closes the connection.
async fn round_trip(stream: &mut TcpStream, request: &str) -> String {
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut raw = Vec::new();
    timeout(IO_TIMEOUT, stream.read_to_end(&mut raw))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8(raw).unwrap()
}

async fn send(app: &SpawnedApp, request: &str) -> String {
    let mut stream = TcpStream::connect(app.addr).await.unwrap();
    round_trip(&mut stream, request).await
}

#[tokio::test]
async fn test_serves_one_request_then_closes() {
    let app = SpawnedApp::start(8).await;

    let response = send(&app, &http_request("GET", "/health", "")).await;

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(response.ends_with(&format!(
        r#"{{"status":"ok","version":"{}"}}"#,
        env!("CARGO_PKG_VERSION")
    )));

    app.stop().await;
}

#[tokio::test]
async fn test_unknown_route_over_tcp_is_404() {
    let app = SpawnedApp::start(8).await;

    let response = send(&app, &http_request("GET", "/nowhere", "")).await;

    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    assert!(response.ends_with(r#"{"error":"not found"}"#));

    app.stop().await;
}

#[tokio::test]
async fn test_register_and_login_over_tcp() {
    let app = SpawnedApp::start(8).await;
    let credentials = r#"{"username":"alice","password":"secret"}"#;

    let registered = send(&app, &http_request("POST", "/users/register", credentials)).await;
    let logged_in = send(&app, &http_request("POST", "/users/login", credentials)).await;
    let rejected = send(
        &app,
        &http_request("POST", "/users/login", r#"{"username":"alice","password":"wrong"}"#),
    )
    .await;

    assert!(registered.starts_with("HTTP/1.1 200"), "{registered}");
    assert!(registered.ends_with(r#"{"status":"ok","user_id":1}"#));
    assert!(logged_in.ends_with(r#"{"status":"ok","user_id":1}"#));
    assert!(rejected.starts_with("HTTP/1.1 401"), "{rejected}");

    app.stop().await;
}

#[tokio::test]
async fn test_malformed_request_does_not_stop_acceptor() {
    let app = SpawnedApp::start(8).await;

    let mut stream = TcpStream::connect(app.addr).await.unwrap();
    let _ = round_trip(&mut stream, "this is not http\r\n\r\n").await;

    let response = send(&app, &http_request("GET", "/health", "")).await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");

    app.stop().await;
}

#[tokio::test]
async fn test_concurrent_connections_are_served() {
    let app = SpawnedApp::start(64).await;

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let addr = app.addr;
            tokio::spawn(async move {
                let body = format!(r#"{{"sender_id":{i},"receiver_id":0,"text":"hello {i}"}}"#);
                let mut stream = TcpStream::connect(addr).await.unwrap();
                round_trip(&mut stream, &http_request("POST", "/messages/send", &body)).await
            })
        })
        .collect();

    for task in tasks {
        let response = task.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    }

    app.stop().await;
}

#[tokio::test]
async fn test_admission_limit_defers_extra_connections() {
    let app = SpawnedApp::start(1).await;

    // Holds the only permit without sending anything yet.
    let mut first = TcpStream::connect(app.addr).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut second = TcpStream::connect(app.addr).await.unwrap();
    second
        .write_all(http_request("GET", "/health", "").as_bytes())
        .await
        .unwrap();

    let mut buf = [0u8; 1];
    let early = timeout(Duration::from_millis(300), second.read(&mut buf)).await;
    assert!(early.is_err(), "second connection was served while the limit was reached");

    let first_response = round_trip(&mut first, &http_request("GET", "/health", "")).await;
    assert!(first_response.starts_with("HTTP/1.1 200"));

    let mut rest = Vec::new();
    timeout(IO_TIMEOUT, second.read_to_end(&mut rest))
        .await
        .expect("second connection was never served")
        .unwrap();
    assert!(String::from_utf8_lossy(&rest).starts_with("HTTP/1.1 200"));

    app.stop().await;
}

#[tokio::test]
async fn test_shutdown_waits_for_in_flight_request() {
    let mut app = SpawnedApp::start(8).await;
    let request = http_request(
        "POST",
        "/users/register",
        r#"{"username":"late","password":"secret"}"#,
    );
    let (head, tail) = request.split_at(request.len() / 2);

    let mut stream = TcpStream::connect(app.addr).await.unwrap();
    stream.write_all(head.as_bytes()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    app.begin_shutdown();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!app.is_stopped(), "server stopped with a request in flight");

    let response = round_trip(&mut stream, tail).await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with(r#"{"status":"ok","user_id":1}"#), "{response}");

    timeout(IO_TIMEOUT, app.stop())
        .await
        .expect("server did not stop after draining");
}

#[tokio::test]
async fn test_bind_conflict_fails_build() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut settings = test_settings(8);
    settings.server.port = occupied.local_addr().unwrap().port();

    let result = Application::build_with(&settings, TestServices::new().services).await;

    assert!(result.is_err());
}
