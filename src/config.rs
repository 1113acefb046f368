//! Store configuration
//!
//! Read from ~/.config/stowage/config.json (or the platform equivalent).
//! Every field is optional; a missing file means "use the platform roots".

use crate::store::DirectoryRoots;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root directory overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Use this path instead of the platform documents directory
    pub documents_dir: Option<PathBuf>,
    /// Use this path instead of the platform cache directory
    pub cache_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("stowage").join("config.json"))
    }

    /// Load from `path`; a missing file yields the default config
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {}", path.display(), e)))
    }

    /// Load from [`StoreConfig::default_path`]
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path()?)
    }

    /// Overlay `other` on top of `self`; settings present in `other` win
    pub fn merge(self, other: StoreConfig) -> Self {
        StoreConfig {
            documents_dir: other.documents_dir.or(self.documents_dir),
            cache_dir: other.cache_dir.or(self.cache_dir),
        }
    }

    pub fn roots(&self) -> DirectoryRoots {
        DirectoryRoots {
            documents: self.documents_dir.clone(),
            cache: self.cache_dir.clone(),
        }
    }
}
