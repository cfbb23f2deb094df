//! Application Error Types
//!
//! Centralized error handling. Errors returned by route handlers are turned
//! into transport responses by the routing table; internal detail is logged
//! and never leaked to the client.

use crate::presentation::http::Response;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures of the credential and confidentiality services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("random number generation failed: {0}")]
    Random(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("cipher operation failed")]
    Cipher,

    #[error("malformed encrypted payload: {0}")]
    Malformed(&'static str),

    #[error("authentication tag mismatch")]
    AuthenticationFailed,
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::BadRequest(_) | AppError::Validation(_) => 400,
            AppError::Conflict(_) => 409,
            AppError::Crypto(_) | AppError::Database(_) | AppError::Internal(_) => 500,
        }
    }
}

impl From<AppError> for Response {
    fn from(error: AppError) -> Self {
        let status = error.status();
        match &error {
            AppError::NotFound(_) => Response::not_found(),
            AppError::BadRequest(msg) | AppError::Validation(msg) | AppError::Conflict(msg) => {
                tracing::debug!(status, error = %error, "Request rejected");
                Response::error(status, msg)
            }
            AppError::Crypto(e) => {
                tracing::error!("Crypto error: {}", e);
                Response::internal_error()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                Response::internal_error()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Response::internal_error()
            }
        }
    }
}
