//! Account storage configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::repository::DEFAULT_STORAGE_KEY;

const DEFAULT_STORE_DIR: &str = ".accounts";

/// Configuration values controlling where accounts are stored.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AccountSettings {
    /// Directory holding the durable store.
    pub store_dir: Option<PathBuf>,
    /// Key under which the collection is stored.
    #[ortho_config(default = String::from(DEFAULT_STORAGE_KEY))]
    pub storage_key: String,
}

impl AccountSettings {
    /// Return the configured store directory, falling back to the default.
    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    /// Return the configured storage key.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}
