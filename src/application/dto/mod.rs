//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{LoginUserRequest, RegisterUserRequest, SendMessageRequest};
pub use response::{HealthResponse, MessageIdResponse, UserIdResponse};
