//! Registration handlers

use axum::extract::{Extension, Json};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

use super::models::RegistrationPayload;
use crate::common::{safe_email_log, AppState};

/// POST /api/auth/register
/// Receives a registration that already passed validation.
///
/// Account creation lives behind this endpoint; the handler only
/// acknowledges the accepted identity.
///
/// # Response
/// ```json
/// {
///   "success": true,
///   "status": 200,
///   "data": { "name": "johndoe", "email": "john.doe@gmail.com" }
/// }
/// ```
pub async fn register_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(payload): Extension<RegistrationPayload>,
) -> Json<Value> {
    let identifier_field = state.register_validator.form().identifier_field();

    let mut data = Map::new();
    for field in [identifier_field, "email"] {
        if let Some(value) = payload.get(field) {
            data.insert(field.to_string(), Value::String(value.to_string()));
        }
    }

    let logged_email = payload
        .get("email")
        .or_else(|| payload.get(identifier_field))
        .map(safe_email_log)
        .unwrap_or_default();
    info!(email = %logged_email, "✅ Registration accepted");

    Json(json!({
        "success": true,
        "status": 200,
        "data": data,
    }))
}
