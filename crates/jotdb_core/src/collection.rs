//! Typed collection API.
//!
//! Provides [`Collection<T>`] for type-safe record access with automatic
//! JSON encoding/decoding via serde.

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// A typed view over one collection of a [`Store`].
///
/// `Collection<T>` binds a collection name and a record type together so
/// callers don't repeat either at every call site. It adds no locking or
/// semantics of its own; every method delegates to the store's generic
/// surface.
///
/// # Example
///
/// ```
/// use jotdb_core::Store;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = Store::open(dir.path()).unwrap();
/// let users = store.collection::<User>("users");
///
/// users.put("alice", &User { name: "Alice".into(), age: 30 }).unwrap();
/// let alice = users.get("alice").unwrap();
/// assert_eq!(alice.age, 30);
/// ```
#[derive(Debug)]
pub struct Collection<'a, T> {
    /// The backing store.
    store: &'a Store,
    /// Collection name.
    name: String,
    /// Type marker.
    _marker: PhantomData<T>,
}

impl<'a, T> Collection<'a, T> {
    pub(crate) fn new(store: &'a Store, name: String) -> Self {
        Self {
            store,
            name,
            _marker: PhantomData,
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Collection<'_, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Writes a record into the collection.
    ///
    /// # Errors
    ///
    /// Same contract as [`Store::write`].
    pub fn put(&self, resource: &str, value: &T) -> StoreResult<()> {
        self.store.write(&self.name, resource, value)
    }

    /// Reads a record from the collection.
    ///
    /// # Errors
    ///
    /// Same contract as [`Store::read`].
    pub fn get(&self, resource: &str) -> StoreResult<T> {
        self.store.read(&self.name, resource)
    }

    /// Deletes a record from the collection.
    ///
    /// # Errors
    ///
    /// Same contract as [`Store::delete`].
    pub fn remove(&self, resource: &str) -> StoreResult<()> {
        self.store.delete(&self.name, resource)
    }

    /// Reads every record in the collection, decoding each into `T`.
    ///
    /// Order is unspecified, matching [`Store::read_all`].
    ///
    /// # Errors
    ///
    /// - [`StoreError::CollectionNotFound`] if the collection doesn't exist
    /// - [`StoreError::Deserialization`] if any record fails to decode
    /// - [`StoreError::Io`] if any file read fails
    pub fn all(&self) -> StoreResult<Vec<T>> {
        self.store
            .read_all(&self.name)?
            .iter()
            .map(|bytes| {
                serde_json::from_slice(bytes)
                    .map_err(|e| StoreError::deserialization(e.to_string()))
            })
            .collect()
    }
}
