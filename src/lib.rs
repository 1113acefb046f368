//! # stowage
//!
//! A typed, name-addressed JSON object store.
//!
//! Values are serialized with `serde_json` and written as whole files under
//! one of two logical directories: `Documents` (persistent) and `Cache`
//! (purgeable). Each directory resolves to a path on every call, so the store
//! always follows the current platform location.
//!
//! ## Core Concepts
//!
//! - **Directory**: a logical root, resolved lazily through [`Roots`]
//! - **Record**: one JSON value addressed by `(Directory, name)`
//! - **Diagnostics**: non-fatal failures are reported to a [`DiagnosticSink`]
//!   as well as returned as [`Error`]
//!
//! ## Example
//!
//! ```ignore
//! use stowage::{Directory, Storage};
//!
//! let storage = Storage::platform();
//! storage.save(&settings, Directory::Documents, "settings.json")?;
//! let settings: Option<Settings> = storage.read("settings.json", Directory::Documents)?;
//! Directory::Documents.clear()?;
//! ```

pub mod config;
pub mod diagnostics;
pub mod store;

mod error;

pub use config::StoreConfig;
pub use diagnostics::{DiagnosticSink, MemorySink, NullSink, TracingSink};
pub use error::{Error, Operation, Result};
pub use store::{Directory, DirectoryRoots, Roots, Storage};
