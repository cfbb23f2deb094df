//! Domain Services
//!
//! Contracts for the security-critical services the use cases depend on.
//! Implementations live in `infrastructure::crypto`.

pub mod message_encryptor;
pub mod password_hasher;

pub use message_encryptor::MessageEncryptor;
pub use password_hasher::PasswordHasher;
