//! HTTP Resources
//!
//! Each resource registers its routes on the [`RouteTable`](super::RouteTable).
//! Handlers decode the body, dispatch a command on the bus and encode the
//! result.

pub mod health;
pub mod message;
pub mod user;

use crate::application::{Command, CommandBus};
use crate::shared::error::AppError;

/// Dispatch on the bus, treating a missing handler as a wiring bug.
pub(crate) async fn dispatch<C: Command>(
    bus: &CommandBus,
    command: C,
) -> Result<C::Output, AppError> {
    bus.dispatch(command).await.unwrap_or_else(|| {
        Err(AppError::Internal(format!(
            "no handler registered for {}",
            std::any::type_name::<C>()
        )))
    })
}
