//! Name-addressed JSON records on disk
//!
//! Layout:
//! ```text
//! <root of Directory>/
//!   <name>        - serde_json encoding of exactly one value
//! ```
//!
//! There is no header, envelope or version field; the file is whatever the
//! codec produced. Every call goes straight to the filesystem.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Operation;
use crate::store::directory::{Directory, DirectoryRoots, Roots};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A typed object store over the documents and cache directories
#[derive(Clone)]
pub struct Storage {
    roots: Arc<dyn Roots>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Storage {
    /// Create a store over the given roots, reporting to `tracing`
    pub fn new(roots: impl Roots + 'static) -> Self {
        Storage {
            roots: Arc::new(roots),
            sink: Arc::new(TracingSink),
        }
    }

    /// Create a store that asks the platform for both directories
    pub fn platform() -> Self {
        Self::new(DirectoryRoots::platform())
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Share an existing sink (e.g. a `MemorySink` the caller keeps a handle to)
    pub fn with_shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Resolve the absolute path of a record
    ///
    /// The name always lands under the directory root: leading separators
    /// are dropped, and names that are empty or climb out with `..` are an
    /// [`Error::InvalidName`].
    pub fn path_for(&self, name: &str, directory: Directory) -> Result<PathBuf> {
        let relative = relative_name(name)?;
        Ok(self.roots.resolve(directory)?.join(relative))
    }

    /// Serialize `value` and write it as the full contents of `directory/name`
    ///
    /// Any existing record with the same name is overwritten.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        value: &T,
        directory: Directory,
        name: &str,
    ) -> Result<()> {
        let path = self.path_for(name, directory)?;

        let data = serde_json::to_vec(value).map_err(|e| Error::Encode {
            name: name.to_string(),
            source: e,
        })?;

        fs::write(&path, data).map_err(|e| Error::io(Operation::Write, &path, e))?;

        tracing::debug!(target: "stowage", %directory, name, "saved record");
        Ok(())
    }

    /// Read `directory/name` back as `T`
    ///
    /// Returns `Ok(None)` when the record was never written. A record that
    /// exists but does not decode as `T` is an [`Error::Decode`].
    pub fn read<T: DeserializeOwned>(&self, name: &str, directory: Directory) -> Result<Option<T>> {
        let path = self.path_for(name, directory)?;

        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path).map_err(|e| Error::io(Operation::Read, &path, e))?;

        match serde_json::from_slice(&data) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.sink
                    .report(&format!("Error reading from {}: {}", path.display(), e));
                Err(Error::Decode { path, source: e })
            }
        }
    }

    /// Remove `directory/name`; a missing record is not an error
    pub fn delete(&self, name: &str, directory: Directory) -> Result<()> {
        let path = self.path_for(name, directory)?;

        if !path.exists() {
            return Ok(());
        }

        remove_entry(&path).map_err(|e| {
            self.sink.report(&format!(
                "Error deleting file {} from {}: {}",
                name, directory, e
            ));
            Error::io(Operation::Remove, &path, e)
        })
    }

    /// Check whether `directory/name` exists
    pub fn file_exists(&self, name: &str, directory: Directory) -> Result<bool> {
        Ok(self.path_for(name, directory)?.exists())
    }

    /// Remove every entry in `directory`, returning what was removed
    ///
    /// Entries are removed in path order. Not transactional: the first
    /// failure stops the sweep and the entries after it stay on disk. The
    /// error carries the entries removed so far.
    pub fn clear(&self, directory: Directory) -> Result<Vec<PathBuf>> {
        let root = self.roots.resolve(directory)?;

        let mut entries = fs::read_dir(&root)
            .and_then(|iter| {
                iter.map(|e| e.map(|e| e.path()))
                    .collect::<io::Result<Vec<_>>>()
            })
            .map_err(|e| {
                self.sink
                    .report(&format!("Error cleaning directory {}", directory));
                Error::io(Operation::List, &root, e)
            })?;
        entries.sort();

        let mut removed = Vec::with_capacity(entries.len());
        for path in entries {
            if let Err(e) = remove_entry(&path) {
                self.sink
                    .report(&format!("Error cleaning directory {}", directory));
                return Err(Error::ClearIncomplete {
                    directory,
                    removed,
                    failed: path,
                    source: e,
                });
            }
            removed.push(path);
        }

        tracing::debug!(
            target: "stowage",
            %directory,
            count = removed.len(),
            "cleared directory"
        );
        Ok(removed)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::platform()
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

/// Turn a caller-supplied name into a path relative to a directory root
fn relative_name(name: &str) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => return Err(Error::InvalidName(name.to_string())),
        }
    }
    if relative.as_os_str().is_empty() {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(relative)
}

fn remove_entry(path: &Path) -> io::Result<()> {
    // symlink_metadata so a link to a directory is unlinked, not followed
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
