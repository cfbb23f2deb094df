//! In-memory repositories.
//!
//! Selected with `storage.backend = "memory"` and used by the test suite.
//! Ids are assigned from 1 upward, mirroring `BIGSERIAL`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Message, MessageId, MessageRepository, User, UserId, UserRepository, Username};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<UserId, AppError> {
        let mut users = self.users.write();
        if users.contains_key(user.username.as_str()) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = User::with_id(id, user.username.clone(), user.password_hash.clone());
        users.insert(user.username.as_str().to_owned(), stored);

        Ok(id)
    }

    async fn find_by_username(&self, username: &Username) -> Option<User> {
        self.users.read().get(username.as_str()).cloned()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
    next_id: AtomicI64,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored message, in insertion order.
    pub fn all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: &Message) -> Result<MessageId, AppError> {
        let id = MessageId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let mut stored = message.clone();
        stored.id = Some(id);
        self.messages.write().push(stored);

        Ok(id)
    }
}
