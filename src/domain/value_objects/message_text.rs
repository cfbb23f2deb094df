//! Message text value objects: the plaintext accepted from a sender and the
//! opaque ciphertext that is actually persisted.

use std::fmt;

use crate::shared::error::AppError;

/// Validated, non-empty plaintext message body.
#[derive(Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the text is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Validation("Message text cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageText({} bytes)", self.0.len())
    }
}

/// Serialized authenticated ciphertext: `<hex nonce>:<hex ciphertext>:<hex tag>`.
///
/// Constructed by a [`MessageEncryptor`](crate::domain::services::MessageEncryptor)
/// or loaded back from storage; the domain never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage(String);

impl EncryptedMessage {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EncryptedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
