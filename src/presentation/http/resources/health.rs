//! Operational Endpoints
//!
//! # Endpoints
//! - `GET /health` - Liveness check
//! - `GET /metrics` - Prometheus text exposition

use crate::application::dto::HealthResponse;
use crate::infrastructure::metrics;
use crate::presentation::http::{Response, RouteTable};
use crate::shared::error::AppError;

const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub fn register_routes(routes: &mut RouteTable) {
    routes.register("GET", "/health", |_| async {
        Response::json(200, &HealthResponse::default())
    });
    routes.register("GET", "/metrics", |_| async {
        let body = metrics::gather_metrics()
            .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {e}")))?;
        Ok(Response::new(200, body).with_header("Content-Type", METRICS_CONTENT_TYPE))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::http::Request;

    #[tokio::test]
    async fn test_health_reports_version() {
        let mut routes = RouteTable::new();
        register_routes(&mut routes);

        let response = routes.route(Request::new("GET", "/health")).await;
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_metrics_is_plain_text() {
        let mut routes = RouteTable::new();
        register_routes(&mut routes);

        let response = routes.route(Request::new("GET", "/metrics")).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").map(String::as_str),
            Some(METRICS_CONTENT_TYPE)
        );
    }
}
