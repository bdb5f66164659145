use index::KeyMode;
use std::path::PathBuf;
use store::StoreOptions;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "employees.dat";

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path of the slot file (default: `employees.dat`)
    pub path: PathBuf,

    /// fsync after every insert and delete (default: false)
    pub sync: bool,

    /// How salary and age keys compare when indexing (default: text)
    pub key_mode: KeyMode,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            sync: false,
            key_mode: KeyMode::Text,
        }
    }
}

impl DbConfig {
    /// Create a new config for the given data file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Enable or disable fsync on writes
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Set the key comparison mode for numeric fields
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions { sync: self.sync }
    }
}
