//! Routing Table
//!
//! Exact-match `(METHOD, path)` lookup. The method is compared
//! case-insensitively; the path, including any query string, is compared as a
//! plain string with no parameter or wildcard matching.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{Request, Response};
use crate::shared::error::AppError;

/// Type-erased route handler.
pub type Handler =
    Arc<dyn Fn(Request) -> BoxFuture<'static, Result<Response, AppError>> + Send + Sync>;

/// Built once at startup, then shared read-only behind `Arc`.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, Handler>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` + `path`. Re-registering a key replaces
    /// the previous handler.
    pub fn register<F, Fut>(&mut self, method: &str, path: &str, handler: F)
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    {
        let key = route_key(method, path);
        let handler: Handler = Arc::new(move |request| handler(request).boxed());
        if self.routes.insert(key.clone(), handler).is_some() {
            tracing::debug!(route = %key, "Replaced route handler");
        }
    }

    pub fn contains(&self, method: &str, path: &str) -> bool {
        self.routes.contains_key(&route_key(method, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve and run the handler for `request`.
    ///
    /// A miss is a 404. Errors returned by the handler are converted into
    /// responses; a panic inside the handler becomes a 500 and is confined to
    /// this call.
    pub async fn route(&self, request: Request) -> Response {
        let key = route_key(request.method(), request.path());
        let Some(handler) = self.routes.get(&key) else {
            tracing::debug!(route = %key, "No route matched");
            return Response::not_found();
        };

        match AssertUnwindSafe(async { handler(request).await })
            .catch_unwind()
            .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => Response::from(error),
            Err(panic) => {
                tracing::error!(route = %key, panic = panic_message(&*panic), "Handler panicked");
                Response::internal_error()
            }
        }
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.routes.keys().collect();
        keys.sort();
        f.debug_struct("RouteTable").field("routes", &keys).finish()
    }
}

fn route_key(method: &str, path: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), path)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}
