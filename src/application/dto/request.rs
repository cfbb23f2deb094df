//! Request DTOs
//!
//! Data structures for API request bodies. Field presence is checked by
//! serde; content rules are enforced by the domain value objects.

use serde::Deserialize;

use crate::application::commands::{LoginUserCommand, RegisterUserCommand, SendMessageCommand};
use crate::domain::UserId;

/// Registration request
#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

/// Send message request
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: String,
}

impl From<RegisterUserRequest> for RegisterUserCommand {
    fn from(request: RegisterUserRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

impl From<LoginUserRequest> for LoginUserCommand {
    fn from(request: LoginUserRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

impl From<SendMessageRequest> for SendMessageCommand {
    fn from(request: SendMessageRequest) -> Self {
        Self {
            sender_id: UserId::new(request.sender_id),
            receiver_id: UserId::new(request.receiver_id),
            text: request.text,
        }
    }
}
