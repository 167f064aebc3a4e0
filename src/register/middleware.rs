// src/register/middleware.rs
//! Request pipeline for the register endpoint.
//!
//! `apply_register_rules` runs the rule set and attaches the outcome to the
//! request; `validate` reads that outcome and either continues or answers
//! with 422.

use axum::{
    body::{to_bytes, Body},
    extract::{Extension, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::models::{ExtractedError, RegistrationPayload, ValidationFailureResponse};
use crate::common::helpers::redact_sensitive_fields;
use crate::common::{safe_email_log, ApiError, AppState, ValidationResult, Validator};

/// Decodes the body, runs the registration rules and stores the
/// `ValidationResult` plus the sanitized `RegistrationPayload` in the request
/// extensions for the stages after it.
pub async fn apply_register_rules(
    Extension(state): Extension<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let limit = state.config.max_body_bytes;

    let bytes = to_bytes(body, limit).await.map_err(|e| {
        warn!(error = %e, limit, "Failed to buffer registration body");
        ApiError::PayloadTooLarge(format!("Request body must not exceed {} bytes", limit))
    })?;

    let payload = decode_payload(&parts.headers, &bytes)?;
    let validator = &state.register_validator;
    let result = validator.validate(&payload);
    let sanitized = validator.sanitize(&payload);

    debug!(
        form = %validator.form(),
        fields = payload.len(),
        empty_payload = payload.is_empty(),
        error_count = result.errors.len(),
        request_body = %redacted_body(&bytes),
        "📥 Registration rules applied"
    );

    parts.extensions.insert(result);
    parts.extensions.insert(sanitized);

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Continues when the attached `ValidationResult` is empty; otherwise ends
/// the request with a 422 listing every failure.
pub async fn validate(
    Extension(state): Extension<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let errors = match request.extensions().get::<ValidationResult>() {
        Some(result) if result.is_valid() => None,
        Some(result) => Some(result.errors.clone()),
        None => {
            error!(
                path = %request.uri().path(),
                "validate ran without a validation result; apply_register_rules must run first"
            );
            return ApiError::InternalServer("Validation result missing".to_string())
                .into_response();
        }
    };

    let Some(errors) = errors else {
        return next.run(request).await;
    };

    let email = request
        .extensions()
        .get::<RegistrationPayload>()
        .and_then(|payload| payload.get("email"))
        .map(safe_email_log);

    let shape = state.config.error_shape;
    let extracted_errors: Vec<ExtractedError> = errors
        .iter()
        .map(|error| ExtractedError::project(error, shape))
        .collect();

    warn!(
        path = %request.uri().path(),
        error_count = extracted_errors.len(),
        email = ?email,
        "Registration rejected by validation"
    );

    let status = StatusCode::UNPROCESSABLE_ENTITY;
    let body = ValidationFailureResponse {
        success: false,
        status: status.as_u16(),
        extracted_errors,
    };

    (status, Json(body)).into_response()
}

/// Non-JSON or empty bodies decode to an empty payload so presence checks
/// report the missing fields.
fn decode_payload(headers: &HeaderMap, bytes: &[u8]) -> Result<RegistrationPayload, ApiError> {
    if bytes.is_empty() || !is_json_content_type(headers) {
        return Ok(RegistrationPayload::new());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {}", e)))?;

    RegistrationPayload::from_json(value)
        .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".to_string()))
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn redacted_body(bytes: &[u8]) -> String {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut json) => {
            redact_sensitive_fields(&mut json);
            json.to_string()
        }
        Err(_) => format!("<{} bytes>", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type).expect("valid header"),
        );
        headers
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(&headers_with("application/json")));
        assert!(is_json_content_type(&headers_with(
            "Application/JSON; charset=utf-8"
        )));
        assert!(is_json_content_type(&headers_with("application/vnd.api+json")));
        assert!(!is_json_content_type(&headers_with("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_decode_payload_variants() {
        let json = headers_with("application/json");

        let empty = decode_payload(&json, b"").expect("empty body is allowed");
        assert!(empty.is_empty());

        let plain = decode_payload(&headers_with("text/plain"), br#"{"name":"x"}"#)
            .expect("non-json body is ignored");
        assert!(plain.is_empty());

        let payload = decode_payload(&json, br#"{"name":"john"}"#).expect("object body");
        assert_eq!(payload.get("name"), Some("john"));

        assert!(matches!(
            decode_payload(&json, b"{not json"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            decode_payload(&json, b"[1,2]"),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_redacted_body_hides_passwords() {
        let printed = redacted_body(br#"{"name":"john","password":"longenough1"}"#);
        assert!(printed.contains("john"));
        assert!(!printed.contains("longenough1"));
        assert_eq!(redacted_body(b"oops"), "<4 bytes>");
    }
}
