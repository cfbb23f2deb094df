//! Message entity and repository trait.
//!
//! Maps to the `messages` table. The text column only ever holds ciphertext.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{EncryptedMessage, MessageId, UserId};
use crate::shared::error::AppError;

/// A direct message between two users.
///
/// Maps to the `messages` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - sender_id: BIGINT NOT NULL
/// - receiver_id: BIGINT NOT NULL
/// - text: TEXT NOT NULL (serialized AES-GCM payload)
/// - created_at: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Assigned by the repository on first save
    pub id: Option<MessageId>,

    pub sender_id: UserId,

    pub receiver_id: UserId,

    /// Encrypted message body
    pub text: EncryptedMessage,

    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build an unsaved message stamped with the current time.
    pub fn new(sender_id: UserId, receiver_id: UserId, text: EncryptedMessage) -> Self {
        Self {
            id: None,
            sender_id,
            receiver_id,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message and return the assigned identity.
    async fn save(&self, message: &Message) -> Result<MessageId, AppError>;
}
