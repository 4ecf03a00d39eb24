//! Field-level validation for account provisioning.
//!
//! Runs before any database call; failures come back as a field → message
//! map so the form can show each message next to its input.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::error::CoreError;
use crate::roles::validate_role;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Account provisioning input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    /// Checked after trimming, the same form that is stored.
    #[validate(custom(function = "validate_trimmed_email"))]
    pub email: String,
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,
    /// Optional repeat of `password`; when present it must match.
    #[serde(default)]
    pub confirm_password: Option<String>,
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,
    pub role: String,
}

fn validate_trimmed_email(email: &str) -> Result<(), validator::ValidationError> {
    if email.trim().validate_email() {
        return Ok(());
    }
    let mut err = validator::ValidationError::new("email");
    err.message = Some("Please enter a valid email address".into());
    Err(err)
}

fn validate_full_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        let mut err = validator::ValidationError::new("required");
        err.message = Some("Full name is required".into());
        return Err(err);
    }
    Ok(())
}

impl NewUser {
    /// Validate every field, collecting all failures at once.
    pub fn check(&self) -> Result<(), CoreError> {
        let mut fields = match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => field_messages(&errors),
        };

        if let Some(confirm) = &self.confirm_password {
            if confirm != &self.password {
                fields.insert("confirm_password".into(), "Passwords don't match".into());
            }
        }
        if let Err(err) = validate_role(&self.role) {
            fields.insert("role".into(), err.to_string());
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(CoreError::FieldValidation(fields))
        }
    }

    /// Email as stored: trimmed and lowercased.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Flatten `validator` errors into the first message per field.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                (field.to_string(), msg)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid() -> NewUser {
        NewUser {
            email: "x@y.com".into(),
            password: "abcdef".into(),
            confirm_password: None,
            full_name: "X Y".into(),
            role: "salesman".into(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid().check().is_ok());
    }

    #[test]
    fn test_malformed_email_reported_on_field() {
        let input = NewUser {
            email: "not-an-email".into(),
            ..valid()
        };
        assert_matches!(input.check(), Err(CoreError::FieldValidation(f))
            if f.get("email").map(String::as_str) == Some("Please enter a valid email address"));
    }

    #[test]
    fn test_short_password_reported() {
        let input = NewUser {
            password: "abc".into(),
            ..valid()
        };
        assert_matches!(input.check(), Err(CoreError::FieldValidation(f))
            if f.contains_key("password"));
    }

    #[test]
    fn test_password_mismatch_reported() {
        let input = NewUser {
            confirm_password: Some("abcdeg".into()),
            ..valid()
        };
        assert_matches!(input.check(), Err(CoreError::FieldValidation(f))
            if f.get("confirm_password").map(String::as_str) == Some("Passwords don't match"));
    }

    #[test]
    fn test_blank_name_and_bad_role_collected_together() {
        let input = NewUser {
            full_name: "  ".into(),
            role: "owner".into(),
            ..valid()
        };
        let Err(CoreError::FieldValidation(fields)) = input.check() else {
            panic!("expected field validation error");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["full_name"], "Full name is required");
        assert!(fields["role"].contains("Invalid role"));
    }

    #[test]
    fn test_padded_email_accepted_and_stored_trimmed() {
        let input = NewUser {
            email: " x@y.com ".into(),
            ..valid()
        };
        assert!(input.check().is_ok());
        assert_eq!(input.normalized_email(), "x@y.com");
    }

    #[test]
    fn test_password_at_minimum_length_accepted() {
        let input = NewUser {
            password: "a".repeat(MIN_PASSWORD_LENGTH as usize),
            ..valid()
        };
        assert!(input.check().is_ok());

        let input = NewUser {
            password: "a".repeat(MIN_PASSWORD_LENGTH as usize - 1),
            ..valid()
        };
        assert!(input.check().is_err());
    }

    #[test]
    fn test_email_normalized() {
        let input = NewUser {
            email: "  Asha.Rao@Example.COM ".into(),
            ..valid()
        };
        assert_eq!(input.normalized_email(), "asha.rao@example.com");
    }
}
