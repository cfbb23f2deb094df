use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::application::bus::CommandHandler;
use crate::application::commands::SendMessageCommand;
use crate::domain::{Message, MessageEncryptor, MessageId, MessageRepository, MessageText};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Encrypts the message text and stores the resulting message.
pub struct SendMessageHandler {
    messages: Arc<dyn MessageRepository>,
    encryptor: Arc<dyn MessageEncryptor>,
}

impl SendMessageHandler {
    pub fn new(messages: Arc<dyn MessageRepository>, encryptor: Arc<dyn MessageEncryptor>) -> Self {
        Self {
            messages,
            encryptor,
        }
    }
}

#[async_trait]
impl CommandHandler<SendMessageCommand> for SendMessageHandler {
    async fn handle(&self, command: SendMessageCommand) -> Result<MessageId, AppError> {
        let text = MessageText::new(command.text)?;

        let started = Instant::now();
        let ciphertext = self.encryptor.encrypt(text.as_str())?;
        metrics::record_crypto_operation("encrypt", started.elapsed().as_secs_f64());

        let message = Message::new(command.sender_id, command.receiver_id, ciphertext);
        let id = self.messages.save(&message).await?;

        tracing::info!(
            message_id = %id,
            sender_id = %message.sender_id,
            receiver_id = %message.receiver_id,
            "Message stored"
        );
        Ok(id)
    }
}
