//! Application Startup
//!
//! Wires storage, crypto services, the command bus and the routing table, and
//! binds the connection acceptor.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::handlers::{LoginUserHandler, RegisterUserHandler, SendMessageHandler};
use crate::application::{CommandBus, LoginUserCommand, RegisterUserCommand, SendMessageCommand};
use crate::config::{Settings, StorageBackend};
use crate::domain::{MessageEncryptor, MessageRepository, PasswordHasher, UserRepository};
use crate::infrastructure::crypto::{AesGcmMessageEncryptor, Pbkdf2PasswordHasher};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    InMemoryMessageRepository, InMemoryUserRepository, PgMessageRepository, PgUserRepository,
};
use crate::presentation::http::{create_router, resources, ConnectionAcceptor, RouteTable};

/// Long-lived collaborators shared by every connection.
#[derive(Clone)]
pub struct AppServices {
    pub hasher: Arc<dyn PasswordHasher>,
    pub encryptor: Arc<dyn MessageEncryptor>,
    pub users: Arc<dyn UserRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl AppServices {
    /// Build services for the configured storage backend.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Pbkdf2PasswordHasher::new());
        let encryptor: Arc<dyn MessageEncryptor> =
            Arc::new(AesGcmMessageEncryptor::new(&settings.crypto.message_secret));

        let services = match settings.storage.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database)
                    .await
                    .context("Failed to create database pool")?;
                tracing::info!("Database connection pool created");

                database::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");

                Self {
                    hasher,
                    encryptor,
                    users: Arc::new(PgUserRepository::new(pool.clone())),
                    messages: Arc::new(PgMessageRepository::new(pool)),
                }
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Self {
                    hasher,
                    encryptor,
                    users: Arc::new(InMemoryUserRepository::new()),
                    messages: Arc::new(InMemoryMessageRepository::new()),
                }
            }
        };

        Ok(services)
    }

    /// In-memory storage with the given crypto services.
    pub fn in_memory(hasher: Arc<dyn PasswordHasher>, encryptor: Arc<dyn MessageEncryptor>) -> Self {
        Self {
            hasher,
            encryptor,
            users: Arc::new(InMemoryUserRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
        }
    }
}

/// Register one handler per command.
pub fn build_command_bus(services: &AppServices) -> CommandBus {
    let mut bus = CommandBus::new();
    bus.register_handler::<RegisterUserCommand, _>(RegisterUserHandler::new(
        services.users.clone(),
        services.hasher.clone(),
    ));
    bus.register_handler::<LoginUserCommand, _>(LoginUserHandler::new(
        services.users.clone(),
        services.hasher.clone(),
    ));
    bus.register_handler::<SendMessageCommand, _>(SendMessageHandler::new(
        services.messages.clone(),
        services.encryptor.clone(),
    ));
    bus
}

/// Register every public and operational route.
pub fn build_route_table(bus: Arc<CommandBus>) -> RouteTable {
    let mut routes = RouteTable::new();
    resources::user::register_routes(&mut routes, bus.clone());
    resources::message::register_routes(&mut routes, bus);
    resources::health::register_routes(&mut routes);
    routes
}

/// Application instance
pub struct Application {
    acceptor: ConnectionAcceptor,
    addr: SocketAddr,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let services = AppServices::from_settings(&settings).await?;
        Self::build_with(&settings, services).await
    }

    /// Build the application around already constructed services.
    ///
    /// Binding happens here, so an address in use fails the build.
    pub async fn build_with(settings: &Settings, services: AppServices) -> Result<Self> {
        let bus = Arc::new(build_command_bus(&services));
        let routes = Arc::new(build_route_table(bus));
        tracing::debug!(routes = routes.len(), "Routing table built");

        let acceptor = ConnectionAcceptor::bind(
            settings.server_addr(),
            create_router(routes),
            settings.server.max_connections,
        )
        .await
        .with_context(|| format!("Failed to bind {}", settings.server_addr()))?;

        let addr = acceptor.local_addr()?;
        tracing::info!(%addr, max_connections = settings.server.max_connections, "Listening");

        Ok(Self { acceptor, addr })
    }

    /// Get the bound address
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the server until Ctrl-C
    pub async fn run_until_stopped(self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await
    }

    /// Run the server until `shutdown` resolves, then let in-flight requests finish
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        self.acceptor.run_until(shutdown).await?;
        Ok(())
    }
}
