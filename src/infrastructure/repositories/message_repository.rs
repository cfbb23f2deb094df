//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait. Only the
//! serialized ciphertext is ever written to the `messages` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Message, MessageId, MessageRepository};
use crate::shared::error::AppError;

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn save(&self, message: &Message) -> Result<MessageId, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, text, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(message.sender_id.as_i64())
        .bind(message.receiver_id.as_i64())
        .bind(message.text.as_str())
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(MessageId::new(id))
    }
}
