//! Human-readable export of user records.
//!
//! Exports are two-space indented JSON. Parsing an export with
//! [`parse_one`] or [`parse_all`] yields records equal to the ones exported.

use camino::Utf8PathBuf;
use cap_std::fs::Dir;
use tracing::info;

use crate::atomic_io::write_atomic;
use crate::error::ExportError;
use crate::record::UserRecord;

/// File name used when exporting the whole collection.
pub const ALL_USERS_FILE_NAME: &str = "all_users.json";

/// A rendered export together with its download file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, `user_<id>.json` or [`ALL_USERS_FILE_NAME`].
    pub file_name: String,
    /// Indented JSON text.
    pub contents: String,
}

impl ExportArtifact {
    /// Renders one record as an artifact named `user_<id>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`] if the record cannot be rendered.
    pub fn for_record(record: &UserRecord) -> Result<Self, ExportError> {
        Ok(Self {
            file_name: format!("user_{}.json", record.id),
            contents: serialize_one(record)?,
        })
    }

    /// Renders a whole collection as an artifact named
    /// [`ALL_USERS_FILE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`] if the records cannot be rendered.
    pub fn for_collection(records: &[UserRecord]) -> Result<Self, ExportError> {
        Ok(Self {
            file_name: ALL_USERS_FILE_NAME.to_owned(),
            contents: serialize_all(records)?,
        })
    }
}

/// Serialises one record as indented JSON.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialisation fails.
pub fn serialize_one(record: &UserRecord) -> Result<String, ExportError> {
    serde_json::to_string_pretty(record).map_err(|err| ExportError::Serialize {
        message: err.to_string(),
    })
}

/// Serialises a collection as an indented JSON array.
///
/// An empty collection renders as `[]`.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialisation fails.
///
/// # Example
///
/// ```
/// use account_provisioning::serialize_all;
///
/// assert_eq!(serialize_all(&[]).expect("serialize"), "[]");
/// ```
pub fn serialize_all(records: &[UserRecord]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(records).map_err(|err| ExportError::Serialize {
        message: err.to_string(),
    })
}

/// Parses text produced by [`serialize_one`].
///
/// # Errors
///
/// Returns [`ExportError::Parse`] if the text is not a user record.
pub fn parse_one(text: &str) -> Result<UserRecord, ExportError> {
    serde_json::from_str(text).map_err(|err| ExportError::Parse {
        message: err.to_string(),
    })
}

/// Parses text produced by [`serialize_all`].
///
/// # Errors
///
/// Returns [`ExportError::Parse`] if the text is not a user collection.
pub fn parse_all(text: &str) -> Result<Vec<UserRecord>, ExportError> {
    serde_json::from_str(text).map_err(|err| ExportError::Parse {
        message: err.to_string(),
    })
}

/// Writes an artifact into `dir` under its file name, replacing any previous
/// export atomically.
///
/// # Errors
///
/// Returns [`ExportError::Write`] if the file cannot be written.
pub fn write_export(dir: &Dir, artifact: &ExportArtifact) -> Result<(), ExportError> {
    let path = Utf8PathBuf::from(&artifact.file_name);
    write_atomic(dir, &path, &artifact.contents)?;
    info!(file_name = %artifact.file_name, bytes = artifact.contents.len(), "export written");
    Ok(())
}
