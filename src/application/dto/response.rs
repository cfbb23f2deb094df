//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{MessageId, UserId};

/// `{"status":"ok","user_id":N}`
#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub status: &'static str,
    pub user_id: UserId,
}

impl From<UserId> for UserIdResponse {
    fn from(user_id: UserId) -> Self {
        Self {
            status: "ok",
            user_id,
        }
    }
}

/// `{"status":"ok","message_id":N}`
#[derive(Debug, Serialize)]
pub struct MessageIdResponse {
    pub status: &'static str,
    pub message_id: MessageId,
}

impl From<MessageId> for MessageIdResponse {
    fn from(message_id: MessageId) -> Self {
        Self {
            status: "ok",
            message_id,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
