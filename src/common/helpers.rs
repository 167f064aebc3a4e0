// Helper functions for safe logging

use serde_json::Value;

/// Body keys whose values never reach the logs.
const SENSITIVE_KEYS: [&str; 2] = ["password", "confirmPassword"];

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) if email.len() > 3 && !local.contains('@') => {
            match local.chars().next() {
                Some(first) => format!("{}***@{}", first, domain),
                None => format!("***@{}", domain),
            }
        }
        _ => "***@***.***".to_string(),
    }
}

/// Replaces password values in a JSON object body with a fixed marker.
pub fn redact_sensitive_fields(value: &mut Value) {
    if let Value::Object(map) = value {
        for key in SENSITIVE_KEYS {
            if let Some(field) = map.get_mut(key) {
                *field = Value::String("[redacted]".to_string());
            }
        }
    }
}
