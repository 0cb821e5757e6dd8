//! Field-level validation for request schemas.
//!
//! A schema checks its fields in declaration order and stops at the first
//! field that fails. Within that field every failing rule is recorded, in the
//! order the rules were applied, so the resulting [`ValidationError`] carries
//! the full list while clients only ever see the first entry.

use validator::{ValidateEmail, ValidateLength};

use crate::error::ValidationError;

/// A request body that can be checked and turned into a validated value.
pub trait Schema {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Rule chain for a single optional string field.
///
/// ```ignore
/// let email = Field::new("email", input.email)
///     .email("Must be a valid email")
///     .required("Email is required")
///     .into_required()?;
/// ```
#[derive(Debug)]
pub struct Field {
    path: &'static str,
    value: Option<String>,
    messages: Vec<String>,
}

impl Field {
    pub fn new(path: &'static str, value: Option<String>) -> Self {
        Self {
            path,
            value,
            messages: Vec::new(),
        }
    }

    /// Fails when the value is missing or empty.
    pub fn required(self, message: &str) -> Self {
        let failed = self.value.as_deref().map_or(true, str::is_empty);
        self.check(failed, message)
    }

    /// Fails when the value is present but only whitespace.
    pub fn not_blank(self, message: &str) -> Self {
        let failed = self
            .value
            .as_deref()
            .is_some_and(|v| v.trim().is_empty());
        self.check(failed, message)
    }

    /// Fails when the value is present but not an email address.
    pub fn email(self, message: &str) -> Self {
        let failed = self.value.as_ref().is_some_and(|v| !v.validate_email());
        self.check(failed, message)
    }

    /// Fails when the value is present and shorter than `min` characters.
    pub fn min_length(self, min: u64, message: &str) -> Self {
        let failed = self
            .value
            .as_ref()
            .is_some_and(|v| !v.validate_length(Some(min), None, None));
        self.check(failed, message)
    }

    /// Finish an optional field.
    pub fn into_optional(self) -> Result<Option<String>, ValidationError> {
        if self.messages.is_empty() {
            Ok(self.value)
        } else {
            Err(ValidationError::new(self.path, self.messages))
        }
    }

    /// Finish a field that must end up with a value.
    pub fn into_required(self) -> Result<String, ValidationError> {
        let path = self.path;
        self.into_optional()?
            .ok_or_else(|| ValidationError::single(path, format!("{path} is required")))
    }

    fn check(mut self, failed: bool, message: &str) -> Self {
        if failed {
            self.messages.push(message.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn required_rejects_missing_and_empty() {
        for value in [None, some("")] {
            let err = Field::new("title", value)
                .required("Title is required")
                .into_required()
                .unwrap_err();
            assert_eq!(err.path, "title");
            assert_eq!(err.messages, vec!["Title is required".to_string()]);
        }
    }

    #[test]
    fn required_accepts_value() {
        let value = Field::new("title", some("Hello"))
            .required("Title is required")
            .into_required()
            .unwrap();
        assert_eq!(value, "Hello");
    }

    #[test]
    fn collects_every_failed_rule_in_order() {
        let err = Field::new("email", some(""))
            .email("Must be a valid email")
            .required("Email is required")
            .into_required()
            .unwrap_err();
        assert_eq!(
            err.messages,
            vec![
                "Must be a valid email".to_string(),
                "Email is required".to_string()
            ]
        );
    }

    #[test]
    fn email_rule_skips_missing_values() {
        let value = Field::new("email", None)
            .email("Must be a valid email")
            .into_optional()
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn email_rule_accepts_addresses() {
        assert!(Field::new("email", some("ada@example.com"))
            .email("Must be a valid email")
            .into_optional()
            .is_ok());
        assert!(Field::new("email", some("not-an-email"))
            .email("Must be a valid email")
            .into_optional()
            .is_err());
    }

    #[test]
    fn min_length_counts_characters() {
        let rule = |v: &str| {
            Field::new("password", some(v))
                .min_length(6, "Password must be at least 6 characters")
                .into_required()
        };
        assert!(rule("12345").is_err());
        assert!(rule("123456").is_ok());
    }

    #[test]
    fn not_blank_only_applies_to_present_values() {
        assert!(Field::new("displayName", None)
            .not_blank("Display Name cannot be empty")
            .into_optional()
            .is_ok());
        assert!(Field::new("displayName", some("   "))
            .not_blank("Display Name cannot be empty")
            .into_optional()
            .is_err());
    }

    #[test]
    fn into_required_without_rules_reports_missing_value() {
        let err = Field::new("content", None).into_required().unwrap_err();
        assert_eq!(err.messages, vec!["content is required".to_string()]);
    }
}
