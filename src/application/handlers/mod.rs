//! Use-case Handlers
//!
//! Thin orchestrators composing the crypto services and repositories. Each
//! implements [`CommandHandler`](crate::application::CommandHandler) for one
//! command type.
//!
//! PBKDF2 work runs on the blocking pool; the request still waits for it.

mod login_user;
mod register_user;
mod send_message;

pub use login_user::LoginUserHandler;
pub use register_user::RegisterUserHandler;
pub use send_message::SendMessageHandler;

use std::time::Instant;

use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Run CPU-bound crypto off the async workers and record its latency.
pub(crate) async fn run_blocking<T, F>(operation: &'static str, f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("{operation} task failed: {e}")))?;
    metrics::record_crypto_operation(operation, started.elapsed().as_secs_f64());
    Ok(result)
}
