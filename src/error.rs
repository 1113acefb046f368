//! Error types for stowage

use crate::store::Directory;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stowage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Filesystem operation that produced an I/O error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Write,
    Read,
    Remove,
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Write => "write",
            Operation::Read => "read",
            Operation::Remove => "remove",
            Operation::List => "list",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in stowage operations
#[derive(Error, Debug)]
pub enum Error {
    /// A logical directory could not be resolved, or configuration is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Record name is empty or would leave the directory root
    #[error("Invalid record name: {0:?}")]
    InvalidName(String),

    #[error("Failed to encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error ({operation}) at {}: {source}", .path.display())]
    Io {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Clearing stopped at `failed`; everything in `removed` is already gone
    #[error(
        "Clear of {directory} stopped at {} after removing {} entries: {source}",
        .failed.display(),
        .removed.len()
    )]
    ClearIncomplete {
        directory: Directory,
        removed: Vec<PathBuf>,
        failed: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(
        operation: Operation,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// True when a stored record exists but could not be decoded as the requested type
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::ClearIncomplete { .. })
    }
}
