//! Transport-neutral response.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;

use crate::shared::error::AppError;

/// Status, body and headers produced by a route handler.
///
/// The routing table never adds headers; the transport adapter supplies
/// `Content-Type: application/json` when a handler did not set one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Bytes,
    headers: HashMap<String, String>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            body: Bytes::new(),
            headers: HashMap::new(),
        }
    }
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, AppError> {
        let body = serde_json::to_vec(value)
            .map_err(|e| AppError::Internal(format!("Response serialization failed: {e}")))?;
        Ok(Self::new(status, body))
    }

    /// `{"error": message}`
    pub fn error(status: u16, message: &str) -> Self {
        Self::new(status, serde_json::json!({ "error": message }).to_string())
    }

    pub fn not_found() -> Self {
        Self::error(404, "not found")
    }

    pub fn internal_error() -> Self {
        Self::error(500, "internal server error")
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }
}
