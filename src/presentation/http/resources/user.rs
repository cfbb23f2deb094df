//! User Resource
//!
//! # Endpoints
//! - `POST /users/register` - Create an account
//! - `POST /users/login` - Check credentials

use std::sync::Arc;

use crate::application::dto::{LoginUserRequest, RegisterUserRequest, UserIdResponse};
use crate::application::{CommandBus, LoginOutcome, LoginUserCommand, RegisterUserCommand};
use crate::presentation::http::{Request, Response, RouteTable};
use crate::shared::error::AppError;

use super::dispatch;

pub fn register_routes(routes: &mut RouteTable, bus: Arc<CommandBus>) {
    let register_bus = bus.clone();
    routes.register("POST", "/users/register", move |request| {
        register(register_bus.clone(), request)
    });
    routes.register("POST", "/users/login", move |request| login(bus.clone(), request));
}

async fn register(bus: Arc<CommandBus>, request: Request) -> Result<Response, AppError> {
    let body: RegisterUserRequest = request.json()?;
    let user_id = dispatch(&bus, RegisterUserCommand::from(body)).await?;

    Response::json(200, &UserIdResponse::from(user_id))
}

async fn login(bus: Arc<CommandBus>, request: Request) -> Result<Response, AppError> {
    let body: LoginUserRequest = request.json()?;

    match dispatch(&bus, LoginUserCommand::from(body)).await? {
        LoginOutcome::Authenticated(user_id) => Response::json(200, &UserIdResponse::from(user_id)),
        LoginOutcome::InvalidCredentials => Ok(Response::error(401, "invalid credentials")),
    }
}
