// src/logging_middleware.rs
//! Middleware tagging each request with an id and logging its outcome

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Reuses the caller's `x-request-id` or generates one, runs the request
/// inside a span carrying it, and echoes the id on the response.
pub async fn log_request_response(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header_value {
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, value.clone());
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);

    let started = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            latency_ms,
            "📤 Response"
        );
    });

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
