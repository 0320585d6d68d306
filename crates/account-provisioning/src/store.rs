//! Durable key-value storage backends.
//!
//! The repository persists its collection through [`DurableStore`], so the
//! storage area is chosen by the caller: [`DirStore`] keeps one JSON file per
//! key inside a directory capability, and [`MemoryStore`] keeps everything in
//! process and records each write for inspection.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::atomic_io::write_atomic;
use crate::error::StoreError;

/// A persistent string-keyed storage area.
pub trait DurableStore {
    /// Reads the payload stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<key>.json` inside a directory.
///
/// Keys may only contain ASCII letters, digits, `-` and `_`. Writes are
/// atomic: the file is replaced by renaming a fully written temp file.
#[derive(Debug)]
pub struct DirStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl DirStore {
    /// Opens `root`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the directory cannot be created or
    /// opened.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use account_provisioning::{DirStore, DurableStore};
    /// use camino::Utf8Path;
    ///
    /// let mut store = DirStore::open(Utf8Path::new(".accounts")).expect("open store");
    /// store.write("registered_users", "[]").expect("write");
    /// assert_eq!(store.read("registered_users").expect("read").as_deref(), Some("[]"));
    /// ```
    pub fn open(root: &Utf8Path) -> Result<Self, StoreError> {
        let open_error = |err: io::Error| StoreError::Read {
            key: root.to_string(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Returns the directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<Utf8PathBuf, StoreError> {
        if key.is_empty() || !key.chars().all(is_key_char) {
            return Err(StoreError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(Utf8PathBuf::from(format!("{key}.json")))
    }
}

const fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl DurableStore for DirStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let file_name = Self::file_name(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                key: key.to_owned(),
                message: err.to_string(),
            }),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        let file_name = Self::file_name(key)?;
        write_atomic(&self.dir, &file_name, contents).map_err(|err| match err {
            StoreError::Write { message, .. } => StoreError::Write {
                key: key.to_owned(),
                message,
            },
            other => other,
        })
    }
}

/// An in-process store that records every write.
///
/// # Example
///
/// ```
/// use account_provisioning::{DurableStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.write("registered_users", "[]").expect("write");
///
/// assert_eq!(store.writes().len(), 1);
/// assert_eq!(store.read("registered_users").expect("read").as_deref(), Some("[]"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
    rejects_writes: bool,
}

impl MemoryStore {
    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, contents: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), contents.into());
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Creates a store whose writes all fail, as a full quota would.
    #[must_use]
    pub fn rejecting_writes() -> Self {
        Self {
            rejects_writes: true,
            ..Self::default()
        }
    }

    /// Returns every successful `(key, contents)` write in call order.
    #[must_use]
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        if self.rejects_writes {
            return Err(StoreError::Write {
                key: key.to_owned(),
                message: "storage quota exceeded".to_owned(),
            });
        }
        self.entries.insert(key.to_owned(), contents.to_owned());
        self.writes.push((key.to_owned(), contents.to_owned()));
        Ok(())
    }
}
