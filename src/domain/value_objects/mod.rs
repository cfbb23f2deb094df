//! # Value Objects
//!
//! Immutable domain types validated at construction. Once a value exists it
//! is never re-checked downstream.

mod credentials;
mod ids;
mod message_text;

pub use credentials::{PasswordHash, Username};
pub use ids::{MessageId, UserId};
pub use message_text::{EncryptedMessage, MessageText};
