use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::run_blocking;
use crate::application::bus::CommandHandler;
use crate::application::commands::{LoginOutcome, LoginUserCommand};
use crate::domain::{PasswordHash, PasswordHasher, UserRepository, Username};
use crate::shared::error::AppError;

/// Checks a username/password pair against the stored hash.
///
/// Unknown user, empty username and wrong password all produce
/// [`LoginOutcome::InvalidCredentials`]. An unknown user is still checked
/// against a decoy hash so the miss costs as much as a wrong password.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    decoy: Option<PasswordHash>,
}

impl LoginUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        let decoy = match hasher.hash(&uuid::Uuid::new_v4().to_string()) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build decoy hash for unknown-user logins");
                None
            }
        };
        Self {
            users,
            hasher,
            decoy,
        }
    }

    async fn verify(&self, password: Zeroizing<String>, stored: PasswordHash) -> bool {
        let hasher = self.hasher.clone();
        run_blocking("verify", move || hasher.verify(&password, &stored))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Password verification did not complete");
                false
            })
    }
}

#[async_trait]
impl CommandHandler<LoginUserCommand> for LoginUserHandler {
    async fn handle(&self, command: LoginUserCommand) -> Result<LoginOutcome, AppError> {
        let Ok(username) = Username::new(command.username) else {
            return Ok(LoginOutcome::InvalidCredentials);
        };

        let password = Zeroizing::new(command.password);
        let Some(user) = self.users.find_by_username(&username).await else {
            if let Some(decoy) = self.decoy.clone() {
                self.verify(password, decoy).await;
            }
            tracing::debug!(username = %username, "Login failed");
            return Ok(LoginOutcome::InvalidCredentials);
        };

        let verified = self.verify(password, user.password_hash.clone()).await;

        match (verified, user.id) {
            (true, Some(id)) => {
                tracing::info!(user_id = %id, "User logged in");
                Ok(LoginOutcome::Authenticated(id))
            }
            (true, None) => Err(AppError::Internal(
                "repository returned a user without an id".into(),
            )),
            (false, _) => {
                tracing::debug!(username = %username, "Login failed");
                Ok(LoginOutcome::InvalidCredentials)
            }
        }
    }
}
