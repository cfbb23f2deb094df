//! Command Bus
//!
//! Routes a command to the single handler registered for its concrete type.
//! Handlers are stored type-erased and recovered with a checked downcast keyed
//! by `TypeId`, so a lookup can never yield a handler for a different command.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::commands::Command;
use crate::shared::error::AppError;

/// Handles one command type.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Output, AppError>;
}

/// Type-keyed command dispatcher.
///
/// Populated at startup, then shared read-only behind `Arc`.
#[derive(Default)]
pub struct CommandBus {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `C`, replacing any previous one.
    pub fn register_handler<C, H>(&mut self, handler: H)
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let handler: Arc<dyn CommandHandler<C>> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<C>(), Box::new(handler))
            .is_some()
        {
            tracing::debug!(command = std::any::type_name::<C>(), "Replaced command handler");
        }
    }

    pub fn has_handler<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    /// Dispatch `command` to its handler.
    ///
    /// Returns `None` when no handler is registered for `C`; the command is
    /// dropped without side effects.
    pub async fn dispatch<C: Command>(&self, command: C) -> Option<Result<C::Output, AppError>> {
        let Some(handler) = self.handler_for::<C>() else {
            tracing::debug!(
                command = std::any::type_name::<C>(),
                "No handler registered, command dropped"
            );
            return None;
        };

        Some(handler.handle(command).await)
    }

    fn handler_for<C: Command>(&self) -> Option<Arc<dyn CommandHandler<C>>> {
        self.handlers
            .get(&TypeId::of::<C>())?
            .downcast_ref::<Arc<dyn CommandHandler<C>>>()
            .cloned()
    }
}

impl std::fmt::Debug for CommandBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
