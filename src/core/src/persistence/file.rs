//! Both stores in one JSON file.

use super::{CookieJar, LocalStorage};
use crate::error::{ErrorCode, ErrorContext, IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The cookie jar and local storage of one "browser".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stores {
    #[serde(default)]
    pub cookies: CookieJar,

    #[serde(default)]
    pub local: LocalStorage,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Location of a saved [`Stores`] file.
#[derive(Debug, Clone)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stores. A missing file yields empty stores.
    pub fn load(&self) -> Result<Stores> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No store file, starting empty");
                return Ok(Stores::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut stores: Stores = serde_json::from_str(&content).map_err(|e| {
            IntakeError::with_internal(
                ErrorCode::StoreFileCorrupt,
                "The saved preferences file is unreadable",
                format!("{}: {}", self.path.display(), e),
            )
        })?;
        stores.cookies.purge_expired();
        Ok(stores)
    }

    /// Write the stores, creating parent directories as needed.
    pub fn save(&self, stores: &Stores) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_error_code(ErrorCode::StorageError)?;
            }
        }
        let json = serde_json::to_string_pretty(stores)?;
        std::fs::write(&self.path, json).with_error_code(ErrorCode::StorageError)?;
        debug!(path = %self.path.display(), "Saved store file");
        Ok(())
    }

    /// Delete the file. Missing is not an error.
    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
