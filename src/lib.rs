//! # Chat Server Library
//!
//! A small chat service: user registration, login and encrypted direct
//! messages over HTTP/1.1.
//!
//! - One tokio task per accepted connection, one request per connection
//! - Routing table keyed by exact method and path
//! - Type-keyed command bus between HTTP resources and use cases
//! - PBKDF2-HMAC-SHA256 password hashing, AES-256-GCM message encryption
//! - PostgreSQL or in-memory persistence
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, value objects, repository and crypto traits
//! - **Application Layer**: Commands, command bus and use-case handlers
//! - **Infrastructure Layer**: Crypto, database, repositories and metrics
//! - **Presentation Layer**: Connection acceptor, routing table and HTTP resources
//!
//! ## Module Structure
//!
//! ```text
//! chat_server/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities, value objects, and traits
//! +-- application/   Commands, command bus, handlers and DTOs
//! +-- infrastructure/ Crypto, database and repository implementations
//! +-- presentation/  Acceptor, routing table and HTTP resources
//! +-- shared/        Common utilities (errors)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Use cases
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - Transport and routing
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
