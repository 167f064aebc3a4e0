//! Registration data models

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::common::ValidationError;

/// Key used for errors that carry no field name in the keyed projection.
pub const GENERAL_ERROR_KEY: &str = "body";

/// Which registration payload the endpoint accepts.
///
/// `Name` takes a display name plus a separate email; `Username` uses an
/// email address as the username and has no separate email field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationForm {
    #[default]
    Name,
    Username,
}

impl RegistrationForm {
    /// The field identifying the account in this form.
    pub fn identifier_field(self) -> &'static str {
        match self {
            RegistrationForm::Name => "name",
            RegistrationForm::Username => "username",
        }
    }

    pub fn default_error_shape(self) -> ErrorShape {
        match self {
            RegistrationForm::Name => ErrorShape::Warning,
            RegistrationForm::Username => ErrorShape::Field,
        }
    }
}

impl fmt::Display for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier_field())
    }
}

impl FromStr for RegistrationForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(RegistrationForm::Name),
            "username" => Ok(RegistrationForm::Username),
            _ => Err("expected 'name' or 'username'".to_string()),
        }
    }
}

/// How each validation error is rendered in the 422 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    /// `{"warning": [message]}`
    Warning,
    /// `{"<field>": message}`
    Field,
}

impl fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorShape::Warning => f.write_str("warning"),
            ErrorShape::Field => f.write_str("field"),
        }
    }
}

impl FromStr for ErrorShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warning" => Ok(ErrorShape::Warning),
            "field" => Ok(ErrorShape::Field),
            _ => Err("expected 'warning' or 'field'".to_string()),
        }
    }
}

/// Submitted registration fields, keyed by name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationPayload {
    fields: HashMap<String, String>,
}

impl RegistrationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a payload from a decoded JSON body.
    ///
    /// Returns `None` when the body is not a JSON object. Scalars are kept as
    /// their string form, `null` counts as absent, and nested values keep
    /// their JSON text.
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other @ (Value::Array(_) | Value::Object(_)) => other.to_string(),
                };
                Some((key, text))
            })
            .collect();

        Some(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RegistrationPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// Field values may hold passwords, so only the keys are printed.
impl fmt::Debug for RegistrationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("RegistrationPayload")
            .field("fields", &keys)
            .finish()
    }
}

/// One entry of `extractedErrors` in the 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractedError {
    Warning { warning: Vec<String> },
    Field(BTreeMap<String, String>),
}

impl ExtractedError {
    pub fn project(error: &ValidationError, shape: ErrorShape) -> Self {
        match shape {
            ErrorShape::Warning => ExtractedError::Warning {
                warning: vec![error.message.clone()],
            },
            ErrorShape::Field => {
                let key = error
                    .field
                    .clone()
                    .unwrap_or_else(|| GENERAL_ERROR_KEY.to_string());
                ExtractedError::Field(BTreeMap::from([(key, error.message.clone())]))
            }
        }
    }
}

/// Body of the 422 response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailureResponse {
    pub success: bool,
    pub status: u16,
    pub extracted_errors: Vec<ExtractedError>,
}
