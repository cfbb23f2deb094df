//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;

use crate::domain::value_objects::{PasswordHash, UserId, Username};
use crate::shared::error::AppError;

/// Represents a user account in the chat system.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: TEXT NOT NULL UNIQUE
/// - password_hash: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the repository on first save
    pub id: Option<UserId>,

    /// Unique login name
    pub username: Username,

    /// PBKDF2 salt and derived key
    pub password_hash: PasswordHash,
}

impl User {
    /// Build a user that has not been persisted yet.
    pub fn new(username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id: None,
            username,
            password_hash,
        }
    }

    /// Rehydrate a stored user.
    pub fn with_id(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id: Some(id),
            username,
            password_hash,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Repository trait for User data access operations.
///
/// Implementations must be safe to call from many connection tasks at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return the assigned identity.
    ///
    /// Fails with `AppError::Conflict` when the username is taken and with
    /// `AppError::Database` on any other storage failure.
    async fn save(&self, user: &User) -> Result<UserId, AppError>;

    /// Find a user by username.
    ///
    /// Fails closed: storage errors are logged and reported as `None`.
    async fn find_by_username(&self, username: &Username) -> Option<User>;
}
