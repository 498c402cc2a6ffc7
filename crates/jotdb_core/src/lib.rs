//! # JotDB Core
//!
//! A minimal embedded document store that persists records as individual
//! JSON files on the filesystem, grouped into collection directories.
//!
//! This crate provides:
//! - [`Store`] - the collection store: open, write, read, read-all, delete
//! - [`Collection`] - a typed view over one collection
//! - [`Config`] - options for opening a store
//! - [`StoreError`] / [`StoreResult`] - error handling
//!
//! ## On-Disk Layout
//!
//! ```text
//! <root>/<collection>/<resource>.json
//! ```
//!
//! The directory tree *is* the database: there is no manifest, index, or
//! metadata file. Record files are tab-indented human-readable JSON, so a
//! store can be inspected and repaired with ordinary shell tools.
//!
//! ## Concurrency
//!
//! The store is a passive, thread-safe shared object. Writes and deletes
//! within one collection are serialized by a per-collection exclusive
//! lock; operations on different collections run in parallel. Reads take
//! no lock at all and may race concurrent mutations of the same resource.
//! See [`Store`] for the full consistency contract.
//!
//! ## Example
//!
//! ```
//! use jotdb_core::Store;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = Store::open(dir.path().join("db")).unwrap();
//!
//! let alice = User { name: "Alice".into(), age: 30 };
//! store.write("users", "alice", &alice).unwrap();
//!
//! let loaded: User = store.read("users", "alice").unwrap();
//! assert_eq!(loaded, alice);
//!
//! store.delete("users", "alice").unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
mod store;

pub use collection::Collection;
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use store::Store;
