//! Error types for the account CLI.

use thiserror::Error;

use crate::error::{ExportError, RegistrationError, StoreError};

/// Errors surfaced by the CLI command flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// `clear` was invoked without confirmation.
    #[error("refusing to delete every account without --yes")]
    ClearNotConfirmed,
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the rejected path.
        path: String,
    },
    /// The export directory could not be opened.
    #[error("failed to open export directory '{path}': {message}")]
    ExportDirectory {
        /// Directory that could not be opened.
        path: String,
        /// Description of the I/O error.
        message: String,
    },
    /// Registration was rejected.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// The account store could not be opened or updated.
    #[error(transparent)]
    Store(#[from] StoreError),
}
