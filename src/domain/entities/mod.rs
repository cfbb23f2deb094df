//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the chat server.
//!
//! - **User**: User account with authentication data
//! - **Message**: An encrypted direct message between two users
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod message;
mod user;

pub use message::{Message, MessageRepository};
pub use user::{User, UserRepository};

#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use user::MockUserRepository;
