//! Application Layer
//!
//! Commands, the type-keyed command bus and the use-case handlers, plus the
//! DTOs the HTTP resources decode into commands. This layer orchestrates the
//! flow of data between the presentation and domain layers.

pub mod bus;
pub mod commands;
pub mod dto;
pub mod handlers;

pub use bus::{CommandBus, CommandHandler};
pub use commands::{
    Command, LoginOutcome, LoginUserCommand, RegisterUserCommand, SendMessageCommand,
};
