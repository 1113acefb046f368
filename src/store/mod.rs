//! Typed object store
//!
//! Records are JSON files addressed by a logical [`Directory`] and a
//! caller-chosen name. The store keeps no state between calls.

mod directory;
mod file_store;

pub use directory::{Directory, DirectoryRoots, Roots};
pub use file_store::Storage;
