//! Input validation rules, one function per input shape.
//!
//! Each function returns either the accepted values or every field error
//! found, never just the first one.

use std::fmt;

use serde::Serialize;
use validator::ValidateEmail;

use crate::domain::PostChanges;

const MAX_TITLE_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field errors for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: ")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accepted registration or login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Accepted content for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub title: String,
    pub text: String,
}

/// Accepted self-service profile edit. The password is still plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Present and non-blank.
fn required<'a>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        None => {
            errors.push(field, "is required");
            None
        }
        Some(v) if is_blank(v) => {
            errors.push(field, "must not be empty");
            None
        }
        Some(v) => Some(v),
    }
}

/// Absent, or present and non-blank.
fn filled<'a>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<Option<&'a str>, ()> {
    match value {
        Some(v) if is_blank(v) => {
            errors.push(field, "must not be empty");
            Err(())
        }
        other => Ok(other),
    }
}

fn max_len(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) -> bool {
    if value.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
        return false;
    }
    true
}

fn email(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if !max_len(errors, field, value, MAX_EMAIL_LEN) {
        return false;
    }
    if !value.validate_email() {
        errors.push(field, "must be a valid email address");
        return false;
    }
    true
}

/// `POST /auth/register`: email (valid format) and password are required.
pub fn validate_registration(
    email_value: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email_value = required(&mut errors, "email", email_value)
        .filter(|v| email(&mut errors, "email", v));
    let password = required(&mut errors, "password", password);

    match (email_value, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
        }),
        _ => Err(errors),
    }
}

/// `POST /auth/login`: both fields present. Format is not checked here;
/// an unknown email is a credential failure, not a validation failure.
pub fn validate_login(
    email_value: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email_value = required(&mut errors, "email", email_value);
    let password = required(&mut errors, "password", password);

    match (email_value, password) {
        (Some(email), Some(password)) => Ok(Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
        }),
        _ => Err(errors),
    }
}

/// `PUT /users/{id}`: every field optional, but a provided email must be a
/// valid address and a provided password must not be empty.
pub fn validate_profile_changes(
    email_value: Option<&str>,
    password: Option<&str>,
) -> Result<ProfileChanges, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email_value = filled(&mut errors, "email", email_value);
    if let Ok(Some(v)) = email_value {
        email(&mut errors, "email", v);
    }
    let password = filled(&mut errors, "password", password);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProfileChanges {
        email: email_value.ok().flatten().map(str::to_owned),
        password: password.ok().flatten().map(str::to_owned),
    })
}

/// `POST /posts`: title and text are both required.
pub fn validate_new_post(
    title: Option<&str>,
    text: Option<&str>,
) -> Result<PostContent, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = required(&mut errors, "title", title)
        .filter(|v| max_len(&mut errors, "title", v, MAX_TITLE_LEN));
    let text = required(&mut errors, "text", text);

    match (title, text) {
        (Some(title), Some(text)) if errors.is_empty() => Ok(PostContent {
            title: title.to_owned(),
            text: text.to_owned(),
        }),
        _ => Err(errors),
    }
}

/// `PUT /posts/{id}`: partial update, omitted fields are kept.
pub fn validate_post_changes(
    title: Option<&str>,
    text: Option<&str>,
) -> Result<PostChanges, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = filled(&mut errors, "title", title);
    if let Ok(Some(v)) = title {
        max_len(&mut errors, "title", v, MAX_TITLE_LEN);
    }
    let text = filled(&mut errors, "text", text);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(PostChanges {
        title: title.ok().flatten().map(str::to_owned),
        text: text.ok().flatten().map(str::to_owned),
    })
}

/// `POST /posts/{id}/comments`: text is required.
pub fn validate_new_comment(text: Option<&str>) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    match required(&mut errors, "text", text) {
        Some(text) => Ok(text.to_owned()),
        None => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_requires_both_fields() {
        let errors = validate_registration(None, None).unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert_eq!(errors.fields().len(), 2);
    }

    #[test]
    fn test_registration_rejects_malformed_email() {
        let errors = validate_registration(Some("test"), Some("password")).unwrap_err();
        assert!(errors.has("email"));
        assert!(!errors.has("password"));
    }

    #[test]
    fn test_registration_missing_password() {
        let errors = validate_registration(Some("test@email.com"), None).unwrap_err();
        assert!(errors.has("password"));
    }

    #[test]
    fn test_registration_accepts_valid_input() {
        let creds = validate_registration(Some("test@email.com"), Some("password")).unwrap();
        assert_eq!(creds.email, "test@email.com");
        assert_eq!(creds.password, "password");
    }

    #[test]
    fn test_login_does_not_check_email_format() {
        assert!(validate_login(Some("not-an-email"), Some("pw")).is_ok());
        assert!(validate_login(Some("a@b.com"), Some("")).is_err());
    }

    #[test]
    fn test_new_post_requires_title_and_text() {
        assert!(validate_new_post(None, None).unwrap_err().fields().len() == 2);
        assert!(validate_new_post(Some("tit"), None).unwrap_err().has("text"));
        assert!(validate_new_post(None, Some("txt")).unwrap_err().has("title"));
        assert!(validate_new_post(Some("  "), Some("txt")).unwrap_err().has("title"));

        let content = validate_new_post(Some("tit"), Some("txt")).unwrap();
        assert_eq!(content.title, "tit");
        assert_eq!(content.text, "txt");
    }

    #[test]
    fn test_new_post_title_length() {
        let long = "a".repeat(256);
        assert!(validate_new_post(Some(&long), Some("txt")).unwrap_err().has("title"));
        assert!(validate_new_post(Some(&long[..255]), Some("txt")).is_ok());
    }

    #[test]
    fn test_post_changes_are_optional() {
        assert_eq!(validate_post_changes(None, None).unwrap(), PostChanges::default());

        let changes = validate_post_changes(Some("tit"), None).unwrap();
        assert_eq!(changes.title.as_deref(), Some("tit"));
        assert_eq!(changes.text, None);
    }

    #[test]
    fn test_post_changes_reject_empty_values() {
        assert!(validate_post_changes(Some(""), None).unwrap_err().has("title"));
        assert!(validate_post_changes(None, Some("")).unwrap_err().has("text"));
    }

    #[test]
    fn test_profile_changes() {
        assert!(validate_profile_changes(Some(""), None).unwrap_err().has("email"));
        assert!(validate_profile_changes(Some("test"), None).unwrap_err().has("email"));
        assert!(validate_profile_changes(None, Some("")).unwrap_err().has("password"));

        let changes = validate_profile_changes(Some("foo@bar.com"), None).unwrap();
        assert_eq!(changes.email.as_deref(), Some("foo@bar.com"));
        assert_eq!(changes.password, None);

        assert_eq!(
            validate_profile_changes(None, None).unwrap(),
            ProfileChanges::default()
        );
    }

    #[test]
    fn test_new_comment() {
        assert!(validate_new_comment(None).unwrap_err().has("text"));
        assert_eq!(validate_new_comment(Some("hi")).unwrap(), "hi");
    }

    #[test]
    fn test_display_lists_every_field() {
        let errors = validate_new_post(None, None).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "Validation failed: title is required, text is required"
        );
    }
}
