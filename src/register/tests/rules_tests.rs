// src/register/tests/rules_tests.rs

#[cfg(test)]
mod tests {
    use crate::common::{ValidationResult, Validator};
    use crate::register::models::{RegistrationForm, RegistrationPayload};
    use crate::register::rules::*;
    use crate::register::validators::RegisterValidator;

    fn payload(pairs: &[(&str, &str)]) -> RegistrationPayload {
        pairs.iter().copied().collect()
    }

    fn valid_name_payload() -> RegistrationPayload {
        payload(&[
            ("name", "johndoe"),
            ("email", "a@b.com"),
            ("password", "longenough1"),
            ("confirmPassword", "longenough1"),
        ])
    }

    fn messages(result: &ValidationResult) -> Vec<&str> {
        result.errors.iter().map(|e| e.message.as_str()).collect()
    }

    fn fields(result: &ValidationResult) -> Vec<&str> {
        result
            .errors
            .iter()
            .map(|e| e.field.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_rule_order_per_form() {
        let name_fields: Vec<&str> = validation_rules(RegistrationForm::Name)
            .iter()
            .map(|rule| rule.field)
            .collect();
        assert_eq!(name_fields, vec!["name", "email", "password", "confirmPassword"]);

        let username_fields: Vec<&str> = validation_rules(RegistrationForm::Username)
            .iter()
            .map(|rule| rule.field)
            .collect();
        assert_eq!(username_fields, vec!["username", "password", "confirmPassword"]);
    }

    #[test]
    fn test_only_name_form_normalizes_email() {
        let sanitized: Vec<&str> = validation_rules(RegistrationForm::Name)
            .iter()
            .filter(|rule| rule.sanitizer.is_some())
            .map(|rule| rule.field)
            .collect();
        assert_eq!(sanitized, vec!["email"]);

        assert!(validation_rules(RegistrationForm::Username)
            .iter()
            .all(|rule| rule.sanitizer.is_none()));
    }

    #[test]
    fn test_valid_name_payload_has_no_errors() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let result = validator.validate(&valid_name_payload());
        assert!(result.is_valid());
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_valid_username_payload_has_no_errors() {
        let validator = RegisterValidator::new(RegistrationForm::Username);
        let result = validator.validate(&payload(&[
            ("username", "a@b.com"),
            ("password", "longenough1"),
            ("confirmPassword", "longenough1"),
        ]));
        assert!(result.is_valid());
    }

    #[test]
    fn test_name_with_whitespace_is_rejected() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let mut data = valid_name_payload();
        data.insert("name", "john doe");

        let result = validator.validate(&data);
        assert_eq!(messages(&result), vec!["Name cannot contains spaces"]);
        assert_eq!(fields(&result), vec!["name"]);
    }

    #[test]
    fn test_whitespace_only_name_is_present_but_invalid() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let mut data = valid_name_payload();
        data.insert("name", "   ");

        let result = validator.validate(&data);
        assert_eq!(messages(&result), vec!["Name cannot contains spaces"]);
    }

    #[test]
    fn test_short_password_in_username_form_yields_single_error() {
        let validator = RegisterValidator::new(RegistrationForm::Username);
        let result = validator.validate(&payload(&[
            ("username", "a@b.com"),
            ("password", "short"),
            ("confirmPassword", "short"),
        ]));

        assert_eq!(result.errors.len(), 1);
        assert_eq!(fields(&result), vec!["password"]);
        assert_eq!(messages(&result), vec!["Password must be at least 8 characters"]);
    }

    #[test]
    fn test_missing_password_reports_empty_for_both_forms() {
        let name_validator = RegisterValidator::new(RegistrationForm::Name);
        let data = payload(&[
            ("name", "johndoe"),
            ("email", "a@b.com"),
            ("confirmPassword", "longenough1"),
        ]);
        let result = name_validator.validate(&data);
        assert!(messages(&result).contains(&"Password cannot be empty"));
        assert!(messages(&result).contains(&"Password must be at least 8 characters"));

        let username_validator = RegisterValidator::new(RegistrationForm::Username);
        let data = payload(&[("username", "a@b.com"), ("confirmPassword", "longenough1")]);
        let result = username_validator.validate(&data);
        assert!(messages(&result).contains(&"Password cannot be blank"));
    }

    #[test]
    fn test_every_failing_check_is_recorded() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let result = validator.validate(&RegistrationPayload::new());

        assert_eq!(
            messages(&result),
            vec![
                "Name cannot be empty",
                "Email cannot be empty",
                "Email is not valid",
                "Password cannot be empty",
                "Password must be at least 8 characters",
                "Password confirmation cannot be empty",
            ]
        );
        assert_eq!(
            fields(&result),
            vec!["name", "email", "email", "password", "password", "confirmPassword"]
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let mut data = valid_name_payload();
        data.insert("confirmPassword", "different1");

        let result = validator.validate(&data);
        assert_eq!(messages(&result), vec!["Password confirmation does not match"]);
        assert_eq!(fields(&result), vec!["confirmPassword"]);
    }

    #[test]
    fn test_confirmation_mismatch_when_password_missing_or_empty() {
        let validator = RegisterValidator::new(RegistrationForm::Username);

        let missing = payload(&[("username", "a@b.com"), ("confirmPassword", "longenough1")]);
        assert!(messages(&validator.validate(&missing))
            .contains(&"Confirmation password does not match"));

        let empty = payload(&[
            ("username", "a@b.com"),
            ("password", ""),
            ("confirmPassword", "longenough1"),
        ]);
        assert!(messages(&validator.validate(&empty))
            .contains(&"Confirmation password does not match"));
    }

    #[test]
    fn test_equal_passwords_produce_no_mismatch_entry() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let data = payload(&[("password", "short"), ("confirmPassword", "short")]);
        let result = validator.validate(&data);
        assert!(!messages(&result).contains(&"Password confirmation does not match"));
    }

    #[test]
    fn test_matches_password_reads_sibling_field() {
        let data = payload(&[("password", "longenough1")]);
        assert!(matches_password(Some("longenough1"), &data).is_ok());
        assert!(matches_password(Some("other"), &data).is_err());
        assert!(matches_password(None, &data).is_err());
        assert!(matches_password(None, &RegistrationPayload::new()).is_ok());
        assert!(matches_password(Some(""), &RegistrationPayload::new()).is_err());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let data = RegistrationPayload::new();
        assert!(Check::MinLength(8).run(Some("ñññññññ"), &data).is_err());
        assert!(Check::MinLength(8).run(Some("ññññññññ"), &data).is_ok());
    }

    #[test]
    fn test_absent_value_passes_whitespace_check() {
        let data = RegistrationPayload::new();
        assert!(Check::NoWhitespace.run(None, &data).is_ok());
        assert!(Check::NotEmpty.run(None, &data).is_err());
        assert!(Check::NotEmpty.run(Some(""), &data).is_err());
        assert!(Check::NotEmpty.run(Some(" "), &data).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let data = payload(&[
            ("name", "john doe"),
            ("email", "not-an-email"),
            ("password", "short"),
            ("confirmPassword", "shorter"),
        ]);

        let first = validator.validate(&data);
        let second = validator.validate(&data);
        assert_eq!(first, second);
        assert_eq!(first.errors.len(), 4);
    }

    #[test]
    fn test_sanitize_lowercases_but_keeps_gmail_dots() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let mut data = valid_name_payload();
        data.insert("email", "John.Doe@gmail.com");

        assert!(validator.validate(&data).is_valid());
        let sanitized = validator.sanitize(&data);
        assert_eq!(sanitized.get("email"), Some("john.doe@gmail.com"));
        assert_eq!(sanitized.get("name"), Some("johndoe"));
        assert_eq!(data.get("email"), Some("John.Doe@gmail.com"));
    }

    #[test]
    fn test_sanitize_skips_invalid_email() {
        let validator = RegisterValidator::new(RegistrationForm::Name);
        let mut data = valid_name_payload();
        data.insert("email", "Not An Email");

        let sanitized = validator.sanitize(&data);
        assert_eq!(sanitized.get("email"), Some("Not An Email"));
    }

    #[test]
    fn test_username_form_does_not_normalize() {
        let validator = RegisterValidator::new(RegistrationForm::Username);
        let data = payload(&[
            ("username", "John.Doe@Gmail.com"),
            ("password", "longenough1"),
            ("confirmPassword", "longenough1"),
        ]);
        let sanitized = validator.sanitize(&data);
        assert_eq!(sanitized, data);
    }
}
