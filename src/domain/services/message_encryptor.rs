//! Message confidentiality contract.

use crate::domain::value_objects::EncryptedMessage;
use crate::shared::error::CryptoError;

/// Authenticated encryption of message bodies.
///
/// Every call to [`encrypt`](MessageEncryptor::encrypt) must use a fresh
/// nonce under the same key.
pub trait MessageEncryptor: Send + Sync {
    /// # Errors
    ///
    /// Fails if no nonce can be generated or the cipher rejects the input.
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedMessage, CryptoError>;

    /// Recover the plaintext of a serialized payload.
    ///
    /// # Errors
    ///
    /// `CryptoError::Malformed` for input that does not parse,
    /// `CryptoError::AuthenticationFailed` when the tag does not verify.
    /// An empty plaintext is a success (`Ok(String::new())`).
    fn decrypt(&self, serialized: &str) -> Result<String, CryptoError>;
}
