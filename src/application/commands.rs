//! Commands
//!
//! Raw, unvalidated inputs to the use cases. Validation happens inside the
//! handlers when the domain value objects are constructed.

use std::fmt;

use crate::domain::{MessageId, UserId};

/// A message that can be dispatched on the [`CommandBus`](super::CommandBus).
///
/// The dispatcher keys handlers by the command's concrete type, so every
/// command is a distinct `'static` type with its own output.
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
}

impl Command for RegisterUserCommand {
    type Output = UserId;
}

#[derive(Clone, PartialEq, Eq)]
pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

impl Command for LoginUserCommand {
    type Output = LoginOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: String,
}

impl Command for SendMessageCommand {
    type Output = MessageId;
}

/// Result of a login attempt.
///
/// Unknown user and wrong password are deliberately the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(UserId),
    InvalidCredentials,
}

impl LoginOutcome {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            LoginOutcome::Authenticated(id) => Some(*id),
            LoginOutcome::InvalidCredentials => None,
        }
    }
}

// Passwords never reach logs.
impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for LoginUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUserCommand")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
