//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use chat_server::application::CommandBus;
use chat_server::config::{
    CryptoSettings, DatabaseSettings, ServerSettings, Settings, StorageBackend, StorageSettings,
};
use chat_server::infrastructure::crypto::{AesGcmMessageEncryptor, Pbkdf2PasswordHasher};
use chat_server::infrastructure::repositories::{InMemoryMessageRepository, InMemoryUserRepository};
use chat_server::presentation::http::create_router;
use chat_server::startup::{build_command_bus, build_route_table, AppServices, Application};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Keeps PBKDF2 cheap in tests; production uses 100k rounds.
pub const TEST_ITERATIONS: u32 = 1_000;

/// In-memory services plus handles the tests inspect directly.
pub struct TestServices {
    pub services: AppServices,
    pub users: Arc<InMemoryUserRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub encryptor: Arc<AesGcmMessageEncryptor>,
}

impl TestServices {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        let encryptor = Arc::new(AesGcmMessageEncryptor::new(TEST_SECRET));
        let services = AppServices {
            hasher: Arc::new(Pbkdf2PasswordHasher::with_iterations(TEST_ITERATIONS)),
            encryptor: encryptor.clone(),
            users: users.clone(),
            messages: messages.clone(),
        };

        Self {
            services,
            users,
            messages,
            encryptor,
        }
    }
}

/// Router-level test application (no sockets)
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub encryptor: Arc<AesGcmMessageEncryptor>,
}

impl TestApp {
    pub fn new() -> Self {
        let TestServices {
            services,
            users,
            messages,
            encryptor,
        } = TestServices::new();
        let bus: Arc<CommandBus> = Arc::new(build_command_bus(&services));
        let router = create_router(Arc::new(build_route_table(bus)));

        Self {
            router,
            users,
            messages,
            encryptor,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "username": username, "password": password });
        self.post_json("/users/register", &body.to_string()).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "username": username, "password": password });
        self.post_json("/users/login", &body.to_string()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }
}

/// Buffered response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// `user_id` or `message_id` from a success body.
    pub fn id(&self, field: &str) -> i64 {
        self.json()[field].as_i64().unwrap()
    }
}

/// Settings for a server on an ephemeral localhost port
pub fn test_settings(max_connections: usize) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
            max_connections,
        },
        database: DatabaseSettings::default(),
        storage: StorageSettings {
            backend: StorageBackend::Memory,
        },
        crypto: CryptoSettings {
            message_secret: TEST_SECRET.into(),
        },
        environment: "test".into(),
    }
}

/// A running server bound to a real socket
pub struct SpawnedApp {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl SpawnedApp {
    pub async fn start(max_connections: usize) -> Self {
        let settings = test_settings(max_connections);
        let app = Application::build_with(&settings, TestServices::new().services)
            .await
            .expect("Failed to build application");
        let addr = app.local_addr();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(app.run_until(async {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Signal shutdown without waiting for the server to stop.
    pub fn begin_shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    pub async fn stop(mut self) {
        self.begin_shutdown();
        if let Some(handle) = self.handle.take() {
            handle.await.unwrap().unwrap();
        }
    }
}

/// Generate a unique test username
pub fn unique_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().to_string()[..8])
}
