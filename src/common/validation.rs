// Common validation types and traits

/// A single failed check: the message shown to the client and, when the
/// failure belongs to one input field, that field's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
}

/// Ordered collection of failures gathered for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError {
            field: Some(field.to_string()),
            message: message.to_string(),
        });
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}
