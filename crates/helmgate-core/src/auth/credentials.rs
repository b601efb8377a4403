//! Credential draft and submit-time validation.
//!
//! Validation runs once per submit attempt - there is no live per-keystroke
//! validation and no state carried between attempts.

use regex::Regex;

/// RFC-5322-style shape check: one `@`, no whitespace, dotted domain
fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// The credential set submitted by the user.
/// Held only for the duration of one submission attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Per-field validation failure, carrying a translatable message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    /// Key the rendering layer resolves to localized error text
    pub fn message_key(&self) -> &'static str {
        match self {
            FieldError::Required => "validation.required",
            FieldError::InvalidEmail => "validation.email.invalid",
        }
    }
}

/// Field-name-to-error mapping produced by a failed validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<FieldError>,
    pub password: Option<FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    pub fn clear(&mut self) {
        self.email = None;
        self.password = None;
    }
}

impl Credentials {
    pub fn new(email: String, password: String, remember_me: bool) -> Self {
        Self {
            email,
            password,
            remember_me,
        }
    }

    /// Check the draft against the structural rules.
    ///
    /// Both fields are checked in one pass so the form can show every
    /// problem at once. Purely a predicate - no state, no side effects.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.email.is_empty() {
            errors.email = Some(FieldError::Required);
        } else if !is_valid_email(&self.email) {
            errors.email = Some(FieldError::InvalidEmail);
        }

        if self.password.is_empty() {
            errors.password = Some(FieldError::Required);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str, password: &str) -> Credentials {
        Credentials::new(email.to_string(), password.to_string(), false)
    }

    #[test]
    fn test_valid_credentials() {
        assert!(draft("ops@example.com", "secret").validate().is_ok());
        assert!(draft("first.last@sub.example.co.uk", "p").validate().is_ok());
    }

    #[test]
    fn test_invalid_email_shapes() {
        // No @, no domain dot, embedded whitespace
        for email in ["plainaddress", "missing@dot", "two words@example.com", "a@b c.com"] {
            let errors = draft(email, "secret").validate().unwrap_err();
            assert_eq!(errors.email, Some(FieldError::InvalidEmail), "{email}");
            assert!(errors.password.is_none());
        }
    }

    #[test]
    fn test_empty_fields_are_required() {
        let errors = draft("", "").validate().unwrap_err();
        assert_eq!(errors.email, Some(FieldError::Required));
        assert_eq!(errors.password, Some(FieldError::Required));
    }

    #[test]
    fn test_empty_password_only() {
        let errors = draft("ops@example.com", "").validate().unwrap_err();
        assert!(errors.email.is_none());
        assert_eq!(errors.password, Some(FieldError::Required));
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(FieldError::Required.message_key(), "validation.required");
        assert_eq!(FieldError::InvalidEmail.message_key(), "validation.email.invalid");
    }
}
