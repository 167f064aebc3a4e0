// src/register/validators.rs

use super::models::{RegistrationForm, RegistrationPayload};
use super::rules::{validation_rules, Rule};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Registration Validator
// ============================================================================

/// Applies the registration rule set to payloads.
#[derive(Debug, Clone)]
pub struct RegisterValidator {
    form: RegistrationForm,
    rules: Vec<Rule>,
}

impl RegisterValidator {
    pub fn new(form: RegistrationForm) -> Self {
        Self {
            form,
            rules: validation_rules(form),
        }
    }

    pub fn form(&self) -> RegistrationForm {
        self.form
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns a copy of `payload` with each rule's sanitizer applied to
    /// fields whose checks all passed. Other fields are copied unchanged.
    pub fn sanitize(&self, payload: &RegistrationPayload) -> RegistrationPayload {
        let mut sanitized = payload.clone();

        for rule in &self.rules {
            let Some(sanitizer) = rule.sanitizer else {
                continue;
            };
            let Some(value) = payload.get(rule.field) else {
                continue;
            };
            if !rule.evaluate(payload).is_valid() {
                continue;
            }
            if let Some(clean) = sanitizer.apply(value) {
                sanitized.insert(rule.field, clean);
            }
        }

        sanitized
    }
}

impl Validator<RegistrationPayload> for RegisterValidator {
    fn validate(&self, data: &RegistrationPayload) -> ValidationResult {
        let mut result = ValidationResult::new();

        for rule in &self.rules {
            result.merge(rule.evaluate(data));
        }

        result
    }
}
