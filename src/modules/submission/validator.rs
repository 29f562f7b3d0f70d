// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, ContactMailerError, ContactMailerResult};
use crate::{raise_error, validate_email};

pub const MIN_FIELD_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 128;
pub const MAX_EMAIL_LENGTH: usize = 256;
pub const MAX_MESSAGE_LENGTH: usize = 2048;

pub struct Validator;

impl Validator {
    /// Checks the three text fields before anything touches disk or network.
    /// The first violated rule is reported.
    pub fn validate(name: &str, email: &str, message: &str) -> ContactMailerResult<()> {
        Self::require("name", name)?;
        Self::require("email", email)?;
        Self::require("message", message)?;

        Self::check_length("name", name, MAX_NAME_LENGTH)?;
        Self::check_length("email", email, MAX_EMAIL_LENGTH)?;
        Self::check_length("message", message, MAX_MESSAGE_LENGTH)?;

        validate_email!(email)
    }

    /// First violation of each field, so a form can report them all at once.
    pub fn field_errors(name: &str, email: &str, message: &str) -> Vec<ContactMailerError> {
        [
            Self::check_field("name", name, MAX_NAME_LENGTH),
            Self::check_field("email", email, MAX_EMAIL_LENGTH)
                .and_then(|_| validate_email!(email)),
            Self::check_field("message", message, MAX_MESSAGE_LENGTH),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    fn check_field(field: &str, value: &str, max: usize) -> ContactMailerResult<()> {
        Self::require(field, value)?;
        Self::check_length(field, value, max)
    }

    fn require(field: &str, value: &str) -> ContactMailerResult<()> {
        if value.trim().is_empty() {
            return Err(raise_error!(
                format!("The {} field is required.", field),
                ErrorCode::MissingField
            ));
        }
        Ok(())
    }

    fn check_length(field: &str, value: &str, max: usize) -> ContactMailerResult<()> {
        let length = value.chars().count();
        if length < MIN_FIELD_LENGTH {
            return Err(raise_error!(
                format!(
                    "The {} field must be at least {} characters long.",
                    field, MIN_FIELD_LENGTH
                ),
                ErrorCode::FieldTooShort
            ));
        }
        if length > max {
            return Err(raise_error!(
                format!("The {} field must not exceed {} characters.", field, max),
                ErrorCode::FieldTooLong
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(name: &str, email: &str, message: &str) -> ErrorCode {
        Validator::validate(name, email, message).unwrap_err().code()
    }

    #[test]
    fn test_valid_submission() {
        assert!(Validator::validate("Alice", "alice@example.com", "Hello there").is_ok());
        assert!(Validator::validate("Bob", "b@c.io", "abc").is_ok());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(code_of("", "alice@example.com", "Hello"), ErrorCode::MissingField);
        assert_eq!(code_of("Alice", "   ", "Hello"), ErrorCode::MissingField);
        assert_eq!(code_of("Alice", "alice@example.com", "\n\t"), ErrorCode::MissingField);
    }

    #[test]
    fn test_presence_checked_before_length() {
        // A short name does not mask a missing message.
        assert_eq!(code_of("Al", "alice@example.com", ""), ErrorCode::MissingField);
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(code_of("Al", "alice@example.com", "Hello"), ErrorCode::FieldTooShort);
        assert_eq!(code_of("Alice", "alice@example.com", "Hi"), ErrorCode::FieldTooShort);
        assert_eq!(
            code_of(&"n".repeat(129), "alice@example.com", "Hello"),
            ErrorCode::FieldTooLong
        );
        assert_eq!(
            code_of("Alice", "alice@example.com", &"m".repeat(2049)),
            ErrorCode::FieldTooLong
        );
        let long_email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(code_of("Alice", &long_email, "Hello"), ErrorCode::FieldTooLong);

        assert!(Validator::validate(&"n".repeat(128), "alice@example.com", "Hello").is_ok());
        assert!(Validator::validate("Alice", "alice@example.com", &"m".repeat(2048)).is_ok());
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(Validator::validate("Zoë", "zoe@example.com", "¡Hé!").is_ok());
        assert!(Validator::validate(&"é".repeat(128), "alice@example.com", "Hello").is_ok());
        assert_eq!(
            code_of(&"é".repeat(129), "alice@example.com", "Hello"),
            ErrorCode::FieldTooLong
        );
    }

    #[test]
    fn test_field_errors_reports_each_field() {
        assert!(Validator::field_errors("Alice", "alice@example.com", "Hello").is_empty());

        let codes: Vec<ErrorCode> = Validator::field_errors("Al", "nope", "")
            .iter()
            .map(|e| e.code())
            .collect();
        assert_eq!(
            codes,
            vec![ErrorCode::FieldTooShort, ErrorCode::InvalidEmail, ErrorCode::MissingField]
        );
    }

    #[test]
    fn test_email_syntax() {
        assert_eq!(code_of("Alice", "not-an-email", "Hello"), ErrorCode::InvalidEmail);
        assert_eq!(code_of("Alice", "alice@", "Hello"), ErrorCode::InvalidEmail);
    }
}
