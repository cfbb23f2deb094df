//! Transport Adapter
//!
//! Bridges axum to the routing table. axum only parses the request and writes
//! the response; every request falls through to [`dispatch`], which hands a
//! [`Request`] to the [`RouteTable`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tower_http::trace::TraceLayer;

use super::{Request, Response, RouteTable};
use crate::infrastructure::metrics;

/// Create the axum service that serves the routing table
pub fn create_router(routes: Arc<RouteTable>) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(routes)
}

async fn dispatch(
    State(routes): State<Arc<RouteTable>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), |pq| pq.as_str().to_owned());

    let mut request = Request::new(method.as_str(), path.as_str()).with_body(body);
    for (name, value) in collect_headers(&headers) {
        request = request.with_header(name, value);
    }

    // Unmatched paths share one label to bound metric cardinality.
    let label = if routes.contains(method.as_str(), &path) {
        path.as_str()
    } else {
        "unmatched"
    };

    let response = routes.route(request).await;
    metrics::record_http_request(
        method.as_str(),
        label,
        response.status(),
        started.elapsed().as_secs_f64(),
    );
    response
}

/// Repeated headers are joined with `", "`; non-UTF-8 values are skipped.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            tracing::debug!(header = %name, "Skipping non-UTF-8 header value");
            continue;
        };
        collected
            .entry(name.as_str().to_owned())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_owned());
    }
    collected
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let (status, headers, body) = self.into_parts();
        let status = StatusCode::from_u16(status).unwrap_or_else(|_| {
            tracing::warn!(status, "Handler produced an invalid status code");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let mut response = (status, body).into_response();
        let map = response.headers_mut();
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }
        response
    }
}
