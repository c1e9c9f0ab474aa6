use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use treeline_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{Object, ObjectKind};
use crate::traits::ObjectStore;

/// Object store backed by a `HashMap` behind a `RwLock`.
///
/// Reads hand out clones. A poisoned lock surfaces as
/// [`StoreError::Backend`] instead of a panic.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Object>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    fn map(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<ObjectId, Object>>> {
        self.objects
            .read()
            .map_err(|_| StoreError::Backend("object map lock poisoned".into()))
    }

    fn map_mut(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<ObjectId, Object>>> {
        self.objects
            .write()
            .map_err(|_| StoreError::Backend("object map lock poisoned".into()))
    }

    /// Number of stored objects of the given kind.
    pub fn count_kind(&self, kind: ObjectKind) -> StoreResult<usize> {
        Ok(self.map()?.values().filter(|obj| obj.kind() == kind).count())
    }

    /// Snapshot of every stored object, sorted by ID.
    pub fn objects(&self) -> StoreResult<Vec<Object>> {
        let mut objects: Vec<Object> = self.map()?.values().cloned().collect();
        objects.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(objects)
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Object>> {
        Ok(self.map()?.get(id).cloned())
    }

    fn write(&self, object: Object) -> StoreResult<ObjectId> {
        let id = object.id().clone();
        let mut map = self.map_mut()?;
        // first copy wins
        if let Entry::Vacant(slot) = map.entry(id.clone()) {
            debug!(id = %id.short_hex(), kind = %object.kind(), "stored new object");
            slot.insert(object);
        }
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.map()?.contains_key(id))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.map()?.len())
    }

    fn ids(&self) -> StoreResult<Vec<ObjectId>> {
        let mut ids: Vec<ObjectId> = self.map()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.map().map(|map| map.len()).unwrap_or_default();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}
