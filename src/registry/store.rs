//! Registry persistence.
//!
//! The registry is read whole, changed in memory through the pure
//! [`append`], and written back whole. There is no locking; concurrent
//! writers race and the last save wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::registry::types::{CoinRecord, Registry};
use crate::registry::{RegistryError, RegistryResult};

/// Return `registry` with `record` added at the end.
///
/// Duplicates (same address, name, or symbol) are kept.
pub fn append(mut registry: Registry, record: CoinRecord) -> Registry {
    registry.coins.push(record);
    registry
}

/// JSON file backing the registry.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry. A missing file is an empty registry.
    pub fn load(&self) -> RegistryResult<Registry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Registry file absent, starting empty");
                return Ok(Registry::default());
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let registry: Registry =
            serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            coins = registry.len(),
            "Registry loaded"
        );
        Ok(registry)
    }

    /// Overwrite the backing file with `registry` as pretty-printed JSON.
    pub fn save(&self, registry: &Registry) -> RegistryResult<()> {
        let mut json = serde_json::to_string_pretty(registry).map_err(RegistryError::Serialize)?;
        json.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RegistryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.path.display(),
            coins = registry.len(),
            "Registry saved"
        );
        Ok(())
    }
}
