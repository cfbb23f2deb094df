//! Crypto Module
//!
//! Concrete implementations of the domain's password hashing and message
//! encryption contracts. Both are stateless and safe to share behind `Arc`.

pub mod aes_gcm_encryptor;
pub mod pbkdf2_hasher;

pub use aes_gcm_encryptor::AesGcmMessageEncryptor;
pub use pbkdf2_hasher::Pbkdf2PasswordHasher;
