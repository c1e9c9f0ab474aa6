use treeline_types::ObjectId;

use crate::error::StoreResult;
use crate::object::Object;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   the same fields always produce the same ID.
/// - Writing an object whose ID is already present is a no-op; the first
///   copy is kept.
/// - There is no deletion. The store only grows.
/// - Concurrent reads are always safe (objects are immutable).
///
/// Durable backends plug in behind this trait without any change to the
/// index or repository layers.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Object>>;

    /// Write an object and return its ID.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    fn write(&self, object: Object) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Number of distinct objects stored.
    fn len(&self) -> StoreResult<usize>;

    /// Returns `true` if nothing has been written yet.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All stored IDs, sorted.
    fn ids(&self) -> StoreResult<Vec<ObjectId>>;
}
