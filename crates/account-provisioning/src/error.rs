//! Error types for the account-provisioning crate.
//!
//! This module defines semantic error enums for registration, export, and
//! durable storage, following the project's error handling conventions with
//! `thiserror`. Every message is suitable for showing to the person filling
//! in the registration form.

use std::fmt;

use thiserror::Error;

/// A required registration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// The given name.
    FirstName,
    /// The family name.
    LastName,
    /// The contact email address.
    Email,
    /// The chosen password.
    Password,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Password => "password",
        };
        f.write_str(label)
    }
}

/// Errors returned when a registration submission is rejected.
///
/// Validation variants are produced before any identity is generated, so a
/// rejected submission never touches the repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The terms of service were not accepted.
    #[error("you must accept the terms and conditions")]
    TermsNotAccepted,

    /// A required field was left empty.
    #[error("please fill in all required fields ({field} is missing)")]
    MissingField {
        /// The first empty field, in form order.
        field: RequiredField,
    },

    /// The email address does not have a `local@domain.tld` shape.
    #[error("please enter a valid email address")]
    InvalidEmailFormat,

    /// Another account already uses this email address.
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// The password confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The password is shorter than the policy minimum.
    #[error("password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },

    /// Every generated identifier collided with an existing record.
    #[error("failed to generate a unique account id after {attempts} attempts")]
    IdGenerationExhausted {
        /// Number of attempts made.
        attempts: usize,
    },

    /// The record was built but the collection could not be persisted.
    #[error("account storage failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised while exporting records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// No record carries the requested identifier.
    #[error("user '{id}' not found")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The records could not be rendered as JSON.
    #[error("failed to serialise export: {message}")]
    Serialize {
        /// Description of the serialisation failure.
        message: String,
    },

    /// Export text could not be parsed back into records.
    #[error("failed to parse export: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// The export artifact could not be written.
    #[error("failed to write export: {0}")]
    Write(#[from] StoreError),
}

/// Errors surfaced by durable store backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stored payload could not be read.
    #[error("failed to read '{key}': {message}")]
    Read {
        /// Storage key being read.
        key: String,
        /// Description of the I/O error.
        message: String,
    },

    /// The payload could not be written.
    #[error("failed to write '{key}': {message}")]
    Write {
        /// Storage key being written.
        key: String,
        /// Description of the I/O error.
        message: String,
    },

    /// The stored payload is not a valid user collection.
    #[error("stored data under '{key}' is corrupt: {message}")]
    Corrupt {
        /// Storage key holding the payload.
        key: String,
        /// Description of the parse error.
        message: String,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key '{key}'")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
}
