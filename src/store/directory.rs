//! Logical directories and how they map onto the filesystem
//!
//! A [`Directory`] is a name, not a path. The path behind it is looked up by a
//! [`Roots`] implementation every time it is needed, so a relocated sandbox or
//! a changed `XDG_*` variable is picked up on the next call.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One of the two storage roots a record can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directory {
    /// Persistent, user-visible storage
    Documents,
    /// Purgeable storage
    Cache,
}

impl Directory {
    pub const ALL: [Directory; 2] = [Directory::Documents, Directory::Cache];

    pub fn as_str(&self) -> &'static str {
        match self {
            Directory::Documents => "documents",
            Directory::Cache => "cache",
        }
    }

    /// Ask the platform for this directory's path
    ///
    /// Looked up on every call, never cached.
    pub fn path(self) -> Result<PathBuf> {
        let path = match self {
            Directory::Documents => dirs::document_dir(),
            Directory::Cache => dirs::cache_dir(),
        };
        path.ok_or_else(|| {
            Error::Config(format!("Could not find {} directory on this platform", self))
        })
    }

    /// Remove every entry in the platform directory
    ///
    /// Stops at the first entry that cannot be removed. See
    /// [`Storage::clear`](crate::Storage::clear).
    pub fn clear(self) -> Result<Vec<PathBuf>> {
        crate::Storage::platform().clear(self)
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Directory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "documents" | "docs" => Ok(Directory::Documents),
            "cache" | "caches" => Ok(Directory::Cache),
            other => Err(Error::Config(format!("Unknown directory: {}", other))),
        }
    }
}

/// Resolves logical directories to absolute paths
pub trait Roots: Send + Sync {
    /// Get the absolute path for `directory` at call time
    fn resolve(&self, directory: Directory) -> Result<PathBuf>;
}

/// Root paths with optional per-directory overrides
///
/// `None` means "ask the platform on every call".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryRoots {
    pub documents: Option<PathBuf>,
    pub cache: Option<PathBuf>,
}

impl DirectoryRoots {
    /// Both directories resolved through the platform
    pub fn platform() -> Self {
        Self::default()
    }

    /// Both directories pinned to the given paths
    pub fn fixed(documents: impl Into<PathBuf>, cache: impl Into<PathBuf>) -> Self {
        DirectoryRoots {
            documents: Some(documents.into()),
            cache: Some(cache.into()),
        }
    }

    fn get(&self, directory: Directory) -> Option<&PathBuf> {
        match directory {
            Directory::Documents => self.documents.as_ref(),
            Directory::Cache => self.cache.as_ref(),
        }
    }
}

impl Roots for DirectoryRoots {
    fn resolve(&self, directory: Directory) -> Result<PathBuf> {
        match self.get(directory) {
            Some(path) => Ok(path.clone()),
            None => directory.path(),
        }
    }
}
