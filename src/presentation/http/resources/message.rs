//! Message Resource
//!
//! # Endpoints
//! - `POST /messages/send` - Store an encrypted direct message

use std::sync::Arc;

use crate::application::dto::{MessageIdResponse, SendMessageRequest};
use crate::application::{CommandBus, SendMessageCommand};
use crate::presentation::http::{Request, Response, RouteTable};
use crate::shared::error::AppError;

use super::dispatch;

pub fn register_routes(routes: &mut RouteTable, bus: Arc<CommandBus>) {
    routes.register("POST", "/messages/send", move |request| send(bus.clone(), request));
}

async fn send(bus: Arc<CommandBus>, request: Request) -> Result<Response, AppError> {
    let body: SendMessageRequest = request.json()?;
    let message_id = dispatch(&bus, SendMessageCommand::from(body)).await?;

    Response::json(200, &MessageIdResponse::from(message_id))
}
