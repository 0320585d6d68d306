//! Registration submission validation.
//!
//! # Validation Rules
//!
//! Rules run in this order and stop at the first failure:
//!
//! 1. First name, last name, email and password must be non-empty
//! 2. Email must have a `local@domain.tld` shape
//! 3. Email must not already be registered (case-insensitive)
//! 4. Password and confirmation must match
//! 5. Password must be at least [`MIN_PASSWORD_LENGTH`] UTF-16 code units
//!
//! Validation only reads the existing collection.

use std::fmt;

use serde::Deserialize;

use crate::error::{RegistrationError, RequiredField};
use crate::record::UserRecord;

/// Minimum password length, counted in UTF-16 code units as a browser form
/// counts it; a character outside the Basic Multilingual Plane counts twice.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Raw form input for a registration attempt.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address, any case.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirm_password: String,
}

impl RegistrationSubmission {
    /// Builds a submission whose confirmation matches the password.
    ///
    /// # Example
    ///
    /// ```
    /// use account_provisioning::RegistrationSubmission;
    ///
    /// let submission = RegistrationSubmission::new("John", "Doe", "john@example.com", "secret1")
    ///     .with_confirmation("secret2");
    ///
    /// assert_ne!(submission.password, submission.confirm_password);
    /// ```
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password_value = password.into();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            confirm_password: password_value.clone(),
            password: password_value,
        }
    }

    /// Replaces the password confirmation.
    #[must_use]
    pub fn with_confirmation(self, confirm_password: impl Into<String>) -> Self {
        Self {
            confirm_password: confirm_password.into(),
            ..self
        }
    }
}

impl fmt::Debug for RegistrationSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationSubmission")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("confirm_password", &"[redacted]")
            .finish()
    }
}

/// Checks a submission against every registration rule.
///
/// # Errors
///
/// Returns the [`RegistrationError`] for the first rule that fails.
///
/// # Example
///
/// ```
/// use account_provisioning::{RegistrationError, RegistrationSubmission, validate_submission};
///
/// let short = RegistrationSubmission::new("John", "Doe", "john@example.com", "abc12");
/// assert_eq!(
///     validate_submission(&short, &[]),
///     Err(RegistrationError::PasswordTooShort { min: 6 })
/// );
/// ```
pub fn validate_submission(
    submission: &RegistrationSubmission,
    existing: &[UserRecord],
) -> Result<(), RegistrationError> {
    if let Some(field) = first_missing_field(submission) {
        return Err(RegistrationError::MissingField { field });
    }
    if !is_valid_email(&submission.email) {
        return Err(RegistrationError::InvalidEmailFormat);
    }
    if is_email_registered(&submission.email, existing) {
        return Err(RegistrationError::DuplicateEmail);
    }
    if submission.password != submission.confirm_password {
        return Err(RegistrationError::PasswordMismatch);
    }
    if submission.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

fn first_missing_field(submission: &RegistrationSubmission) -> Option<RequiredField> {
    [
        (RequiredField::FirstName, &submission.first_name),
        (RequiredField::LastName, &submission.last_name),
        (RequiredField::Email, &submission.email),
        (RequiredField::Password, &submission.password),
    ]
    .into_iter()
    .find(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
}

/// Returns `true` if the address has a basic `local@domain.tld` shape.
///
/// The local part and domain must be non-empty and free of whitespace and
/// further `@` signs; the domain needs a dot with text on both sides.
///
/// # Examples
///
/// ```
/// use account_provisioning::is_valid_email;
///
/// assert!(is_valid_email("john@example.com"));
/// assert!(!is_valid_email("john@example"));
/// assert!(!is_valid_email("john doe@example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_email_char) {
        return false;
    }
    if !domain.chars().all(is_email_char) {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

fn is_email_char(c: char) -> bool {
    !c.is_whitespace() && c != '@'
}

/// Returns `true` if any record already uses `email`, ignoring case.
#[must_use]
pub fn is_email_registered(email: &str, existing: &[UserRecord]) -> bool {
    let folded = email.to_lowercase();
    existing
        .iter()
        .any(|record| record.personal_info.email.to_lowercase() == folded)
}
