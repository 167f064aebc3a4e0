// src/register/rules.rs
//! Declarative rule set for registration payloads.
//!
//! A [`Rule`] names one field and lists the checks to run against it, each
//! with the message reported when it fails. Declaring rules has no side
//! effects; [`super::validators::RegisterValidator`] executes them.

use std::fmt;

use super::models::{RegistrationForm, RegistrationPayload};
use crate::common::email::{is_email, normalize_email, NormalizeEmailOptions};
use crate::common::ValidationResult;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A check that may look at sibling fields. Receives the field's own value
/// and the whole payload; `Err` carries the reason the check failed.
pub type CustomCheck = fn(Option<&str>, &RegistrationPayload) -> Result<(), String>;

#[derive(Clone, Copy)]
pub enum Check {
    /// Present and not zero-length.
    NotEmpty,
    /// No whitespace characters. An absent value passes.
    NoWhitespace,
    Email,
    /// At least this many characters.
    MinLength(usize),
    Custom(CustomCheck),
}

impl Check {
    pub fn run(&self, value: Option<&str>, payload: &RegistrationPayload) -> Result<(), String> {
        let text = value.unwrap_or_default();
        match self {
            Check::NotEmpty => {
                if text.is_empty() {
                    return Err("value is empty".to_string());
                }
            }
            Check::NoWhitespace => {
                if text.chars().any(char::is_whitespace) {
                    return Err("value contains whitespace".to_string());
                }
            }
            Check::Email => {
                if !is_email(text) {
                    return Err("value is not an email address".to_string());
                }
            }
            Check::MinLength(min) => {
                if text.chars().count() < *min {
                    return Err(format!("value is shorter than {} characters", min));
                }
            }
            Check::Custom(check) => return check(value, payload),
        }
        Ok(())
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::NotEmpty => f.write_str("NotEmpty"),
            Check::NoWhitespace => f.write_str("NoWhitespace"),
            Check::Email => f.write_str("Email"),
            Check::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
            Check::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Rewrites a field's value once its checks pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    NormalizeEmail(NormalizeEmailOptions),
}

impl Sanitizer {
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            Sanitizer::NormalizeEmail(options) => normalize_email(value, options),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub check: Check,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub field: &'static str,
    pub checks: Vec<FieldCheck>,
    pub sanitizer: Option<Sanitizer>,
}

impl Rule {
    pub fn field(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
            sanitizer: None,
        }
    }

    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push(FieldCheck { check, message });
        self
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.check(Check::NotEmpty, message)
    }

    pub fn no_whitespace(self, message: &'static str) -> Self {
        self.check(Check::NoWhitespace, message)
    }

    pub fn email(self, message: &'static str) -> Self {
        self.check(Check::Email, message)
    }

    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    pub fn custom(self, check: CustomCheck, message: &'static str) -> Self {
        self.check(Check::Custom(check), message)
    }

    pub fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Runs every check in declaration order. A failing check does not stop
    /// the ones after it.
    pub fn evaluate(&self, payload: &RegistrationPayload) -> ValidationResult {
        let mut result = ValidationResult::new();
        let value = payload.get(self.field);

        for field_check in &self.checks {
            if field_check.check.run(value, payload).is_err() {
                result.add_error(self.field, field_check.message);
            }
        }

        result
    }
}

/// Cross-field check for `confirmPassword`. Both fields absent counts as a
/// match; absent against present (even empty) does not.
pub fn matches_password(
    confirm_password: Option<&str>,
    payload: &RegistrationPayload,
) -> Result<(), String> {
    if confirm_password != payload.get("password") {
        return Err("Password confirmation does not match password".to_string());
    }
    Ok(())
}

/// Email normalization used by the name form: lower-case everything but keep
/// dots in Gmail local parts.
pub fn name_form_email_options() -> NormalizeEmailOptions {
    NormalizeEmailOptions {
        gmail_remove_dots: false,
        all_lowercase: true,
        ..NormalizeEmailOptions::default()
    }
}

/// Ordered rules for the given registration form.
pub fn validation_rules(form: RegistrationForm) -> Vec<Rule> {
    match form {
        RegistrationForm::Name => vec![
            Rule::field("name")
                .not_empty("Name cannot be empty")
                .no_whitespace("Name cannot contains spaces"),
            Rule::field("email")
                .not_empty("Email cannot be empty")
                .email("Email is not valid")
                .sanitize(Sanitizer::NormalizeEmail(name_form_email_options())),
            Rule::field("password")
                .not_empty("Password cannot be empty")
                .min_length(MIN_PASSWORD_LENGTH, "Password must be at least 8 characters"),
            Rule::field("confirmPassword")
                .not_empty("Password confirmation cannot be empty")
                .custom(matches_password, "Password confirmation does not match"),
        ],
        RegistrationForm::Username => vec![
            Rule::field("username")
                .not_empty("Email cannot be blank")
                .email("Email is not valid"),
            Rule::field("password")
                .not_empty("Password cannot be blank")
                .min_length(MIN_PASSWORD_LENGTH, "Password must be at least 8 characters"),
            Rule::field("confirmPassword")
                .not_empty("Confirmation password cannot be blank")
                .custom(matches_password, "Confirmation password does not match"),
        ],
    }
}
