use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::run_blocking;
use crate::application::bus::CommandHandler;
use crate::application::commands::RegisterUserCommand;
use crate::domain::{PasswordHasher, User, UserId, UserRepository, Username};
use crate::shared::error::AppError;

/// Validates the username, hashes the password and stores the new user.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl CommandHandler<RegisterUserCommand> for RegisterUserHandler {
    async fn handle(&self, command: RegisterUserCommand) -> Result<UserId, AppError> {
        let username = Username::new(command.username)?;

        let hasher = self.hasher.clone();
        let password = Zeroizing::new(command.password);
        let password_hash = run_blocking("hash", move || hasher.hash(&password)).await??;

        let user = User::new(username, password_hash);
        let id = self.users.save(&user).await?;

        tracing::info!(user_id = %id, username = %user.username, "User registered");
        Ok(id)
    }
}
