//! Directory-backed collection store.
//!
//! This module handles the file system layout for JotDB:
//!
//! ```text
//! <root>/
//! ├─ users/
//! │  ├─ alice.json
//! │  └─ bob.json
//! └─ products/
//!    └─ widget.json
//! ```
//!
//! Each collection is a subdirectory of the root, created on first write.
//! Each record is one tab-indented JSON file named `<resource>.json`.
//! The directory tree is the database; there is no manifest or index file.

use crate::collection::Collection;
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// File extension for record files.
const RECORD_EXT: &str = "json";

/// A directory-backed document store.
///
/// `Store` persists records as individual JSON files grouped into
/// collection directories. Writes and deletes within one collection are
/// serialized by a per-collection exclusive lock; operations on different
/// collections run fully in parallel.
///
/// # Thread Safety
///
/// The store is a passive shared object: it can be used from any number of
/// threads at once and holds no open file handles between operations.
///
/// # Consistency
///
/// Reads take no collection lock. A read racing a concurrent write or
/// delete of the same resource may observe the file absent, with old
/// content, or with new content; nothing stronger than what the
/// filesystem provides is promised. Record files are written in place
/// with no temp-file-then-rename staging, so a crash or power loss during
/// a write can leave a truncated file. Both are deliberate properties of
/// the on-disk contract, not oversights.
///
/// # Example
///
/// ```
/// use jotdb_core::Store;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = Store::open(dir.path().join("db")).unwrap();
///
/// store.write("users", "alice", &"hello").unwrap();
/// let greeting: String = store.read("users", "alice").unwrap();
/// assert_eq!(greeting, "hello");
/// ```
#[derive(Debug)]
pub struct Store {
    /// Root directory. Immutable after open.
    root: PathBuf,
    /// Per-collection write locks, created lazily on first use.
    ///
    /// The outer mutex guards only lookup/insert and is never held across
    /// file I/O, so writers in unrelated collections do not serialize on it.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Store {
    /// Opens a store rooted at the given directory.
    ///
    /// The path is normalized lexically (redundant `.` and resolvable `..`
    /// segments removed) and the directory is created, along with any
    /// missing parents, if it doesn't exist. An existing directory is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or the
    /// path exists but is not a directory.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_config(root, Config::default())
    }

    /// Opens a store rooted at the given directory with custom configuration.
    ///
    /// With `create_if_missing` disabled, a missing root directory is an
    /// error instead of being created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the root is missing and creation is
    /// disabled, if creation fails, or if the path is not a directory.
    pub fn open_with_config(root: impl AsRef<Path>, config: Config) -> StoreResult<Self> {
        let root = normalize(root.as_ref());

        if !root.exists() {
            if config.create_if_missing {
                fs::create_dir_all(&root)?;
            } else {
                return Err(StoreError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("store root does not exist: {}", root.display()),
                )));
            }
        } else if !root.is_dir() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("store root is not a directory: {}", root.display()),
            )));
        }

        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Returns the store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a typed view over one collection.
    pub fn collection<T>(&self, name: impl Into<String>) -> Collection<'_, T> {
        Collection::new(self, name.into())
    }

    /// Writes a record, creating the collection on first use.
    ///
    /// The record file is created if absent or fully replaced if present.
    /// The write holds the collection's exclusive lock, so at most one
    /// write or delete proceeds per collection at a time; writes to other
    /// collections are unaffected.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingIdentifier`] if `collection` or `resource` is
    ///   empty (checked before any filesystem access)
    /// - [`StoreError::Serialization`] if the value cannot be encoded;
    ///   nothing is written in that case
    /// - [`StoreError::Io`] if directory creation or the file write fails
    pub fn write<T: Serialize>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> StoreResult<()> {
        if collection.is_empty() || resource.is_empty() {
            return Err(StoreError::MissingIdentifier);
        }

        let lock = self.collection_lock(collection);
        let _guard = lock.lock();

        let dir = self.root.join(collection);
        let path = dir.join(format!("{resource}.{RECORD_EXT}"));

        fs::create_dir_all(&dir)?;

        let bytes = to_pretty_json(value)?;
        fs::write(&path, bytes)?;

        tracing::debug!(collection, resource, "record written");
        Ok(())
    }

    /// Reads a record and decodes it into `T`.
    ///
    /// Takes no collection lock; see the [consistency notes](Store#consistency).
    ///
    /// # Errors
    ///
    /// - [`StoreError::RecordNotFound`] if the record file does not exist
    /// - [`StoreError::Deserialization`] if the stored bytes don't decode
    ///   into `T`
    /// - [`StoreError::Io`] if reading the file fails
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> StoreResult<T> {
        let path = self.record_path(collection, resource);
        if !path.exists() {
            return Err(StoreError::record_not_found(collection, resource));
        }

        let bytes = fs::read(&path)?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::deserialization(e.to_string()))
    }

    /// Reads the raw contents of every record in a collection.
    ///
    /// Decoding is left to the caller, per record. Enumeration order is
    /// whatever the filesystem yields; it is not sorted and not
    /// insertion-ordered. Takes no collection lock, so concurrent writers
    /// may be observed mid-flight across different records.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CollectionNotFound`] if the collection directory
    ///   does not exist
    /// - [`StoreError::Io`] if any individual file read fails; unreadable
    ///   entries are never silently skipped
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<Vec<u8>>> {
        let dir = self.root.join(collection);
        if !dir.is_dir() {
            return Err(StoreError::collection_not_found(collection));
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            records.push(fs::read(entry.path())?);
        }

        Ok(records)
    }

    /// Deletes a record.
    ///
    /// Holds the collection's exclusive lock, so deletes are mutually
    /// exclusive with concurrent writes and deletes in the same collection.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingIdentifier`] if `collection` or `resource` is
    ///   empty (checked before any filesystem access)
    /// - [`StoreError::RecordNotFound`] if the record file does not exist
    /// - [`StoreError::Io`] if removal fails for any other reason
    pub fn delete(&self, collection: &str, resource: &str) -> StoreResult<()> {
        if collection.is_empty() || resource.is_empty() {
            return Err(StoreError::MissingIdentifier);
        }

        let lock = self.collection_lock(collection);
        let _guard = lock.lock();

        let path = self.record_path(collection, resource);
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::record_not_found(collection, resource)
            } else {
                StoreError::Io(e)
            }
        })?;

        tracing::debug!(collection, resource, "record deleted");
        Ok(())
    }

    /// Returns the exclusive lock for a collection, creating it on first use.
    ///
    /// The lock table is guarded so that two callers racing to first-touch
    /// the same collection converge on one lock object. The guard is
    /// released before any file I/O happens.
    fn collection_lock(&self, collection: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(collection.to_string()).or_default())
    }

    fn record_path(&self, collection: &str, resource: &str) -> PathBuf {
        self.root
            .join(collection)
            .join(format!("{resource}.{RECORD_EXT}"))
    }
}

/// Serializes a value as tab-indented JSON, the on-disk record format.
fn to_pretty_json<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    Ok(buf)
}

/// Removes `.` segments and resolves `..` against preceding components,
/// lexically, without consulting the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
