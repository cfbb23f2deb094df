//! # Domain Layer
//!
//! The domain layer contains the core business types of the chat server.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Message) and repository traits
//! - **value_objects**: Immutable value types validated at construction
//! - **services**: Password hashing and message encryption contracts
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository and service traits define the contracts infrastructure fulfils

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
