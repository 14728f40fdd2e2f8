use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use storefront_core::{DomainError, RecordId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("record id space exhausted")]
    IdsExhausted,

    #[error("conflicting record: {0}")]
    Conflict(String),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(msg) => DomainError::conflict(msg),
            other => DomainError::storage(other.to_string()),
        }
    }
}

/// Keyed record storage with store-assigned ids.
///
/// Ids start at 1, only ever grow, and are never handed out twice, even after
/// the record that held one is removed.
pub trait RecordStore<V>: Send + Sync {
    /// Reserve the next id.
    fn next_id(&self) -> Result<RecordId, StoreError>;

    fn get(&self, id: RecordId) -> Result<Option<V>, StoreError>;

    /// All records, ordered by id.
    fn list(&self) -> Result<Vec<V>, StoreError>;

    /// First record (by id) matching `pred`.
    fn find(&self, pred: &dyn Fn(&V) -> bool) -> Result<Option<V>, StoreError>;

    /// Insert under `id`, failing with `Conflict` if any existing record
    /// satisfies `clashes`. The check and the write happen under one lock.
    fn insert_unless(
        &self,
        id: RecordId,
        value: V,
        clashes: &dyn Fn(&V) -> bool,
    ) -> Result<(), StoreError>;

    /// Overwrite an existing record. Returns `None` (and writes nothing) if
    /// `id` is absent. Records other than `id` are checked against `clashes`.
    fn replace_unless(
        &self,
        id: RecordId,
        value: V,
        clashes: &dyn Fn(&V) -> bool,
    ) -> Result<Option<V>, StoreError>;

    /// Remove and return the record, if present.
    fn remove(&self, id: RecordId) -> Result<Option<V>, StoreError>;

    fn insert(&self, id: RecordId, value: V) -> Result<(), StoreError> {
        self.insert_unless(id, value, &|_| false)
    }

    fn replace(&self, id: RecordId, value: V) -> Result<Option<V>, StoreError> {
        self.replace_unless(id, value, &|_| false)
    }
}

impl<V, S> RecordStore<V> for Arc<S>
where
    S: RecordStore<V> + ?Sized,
{
    fn next_id(&self) -> Result<RecordId, StoreError> {
        (**self).next_id()
    }

    fn get(&self, id: RecordId) -> Result<Option<V>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }

    fn find(&self, pred: &dyn Fn(&V) -> bool) -> Result<Option<V>, StoreError> {
        (**self).find(pred)
    }

    fn insert_unless(
        &self,
        id: RecordId,
        value: V,
        clashes: &dyn Fn(&V) -> bool,
    ) -> Result<(), StoreError> {
        (**self).insert_unless(id, value, clashes)
    }

    fn replace_unless(
        &self,
        id: RecordId,
        value: V,
        clashes: &dyn Fn(&V) -> bool,
    ) -> Result<Option<V>, StoreError> {
        (**self).replace_unless(id, value, clashes)
    }

    fn remove(&self, id: RecordId) -> Result<Option<V>, StoreError> {
        (**self).remove(id)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryRecordStore<V> {
    inner: RwLock<BTreeMap<RecordId, V>>,
    next: AtomicU32,
}

impl<V> InMemoryRecordStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next: AtomicU32::new(1),
        }
    }
}

impl<V> Default for InMemoryRecordStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecordStore<V> for InMemoryRecordStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn next_id(&self) -> Result<RecordId, StoreError> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map(RecordId::new)
            .map_err(|_| StoreError::IdsExhausted)
    }

    fn get(&self, id: RecordId) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn find(&self, pred: &dyn Fn(&V) -> bool) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().find(|v| pred(v)).cloned())
    }

    fn insert_unless(
        &self,
        id: RecordId,
        value: V,
        clashes: &dyn Fn(&V) -> bool,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if map.contains_key(&id) {
            return Err(StoreError::Conflict(format!("id {id} already in use")));
        }
        if map.values().any(|v| clashes(v)) {
            return Err(StoreError::Conflict("unique field already taken".to_string()));
        }
        map.insert(id, value);
        Ok(())
    }

    fn replace_unless(
        &self,
        id: RecordId,
        value: V,
        clashes: &dyn Fn(&V) -> bool,
    ) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if !map.contains_key(&id) {
            return Ok(None);
        }
        if map.iter().any(|(k, v)| *k != id && clashes(v)) {
            return Err(StoreError::Conflict("unique field already taken".to_string()));
        }
        Ok(map.insert(id, value))
    }

    fn remove(&self, id: RecordId) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryRecordStore<String> {
        InMemoryRecordStore::new()
    }

    #[test]
    fn ids_start_at_one_and_are_not_reused() {
        let s = store();
        let a = s.next_id().unwrap();
        s.insert(a, "a".into()).unwrap();
        assert_eq!(a, RecordId::new(1));

        s.remove(a).unwrap();
        let b = s.next_id().unwrap();
        assert_eq!(b, RecordId::new(2));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let s = store();
        for name in ["x", "y", "z"] {
            let id = s.next_id().unwrap();
            s.insert(id, name.into()).unwrap();
        }
        assert_eq!(s.list().unwrap(), vec!["x", "y", "z"]);
    }

    #[test]
    fn replace_of_missing_record_writes_nothing() {
        let s = store();
        assert_eq!(s.replace(RecordId::new(9), "nope".into()).unwrap(), None);
        assert!(s.get(RecordId::new(9)).unwrap().is_none());
    }

    #[test]
    fn replace_returns_previous_value() {
        let s = store();
        let id = s.next_id().unwrap();
        s.insert(id, "old".into()).unwrap();
        assert_eq!(s.replace(id, "new".into()).unwrap().as_deref(), Some("old"));
        assert_eq!(s.get(id).unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn insert_unless_rejects_clashing_values() {
        let s = store();
        let id = s.next_id().unwrap();
        s.insert(id, "taken".into()).unwrap();

        let err = s
            .insert_unless(s.next_id().unwrap(), "taken".into(), &|v| v == "taken")
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(s.list().unwrap().len(), 1);
    }

    #[test]
    fn replace_unless_ignores_the_record_being_replaced() {
        let s = store();
        let a = s.next_id().unwrap();
        s.insert(a, "same".into()).unwrap();
        let b = s.next_id().unwrap();
        s.insert(b, "other".into()).unwrap();

        assert!(s.replace_unless(a, "same".into(), &|v| v == "same").is_ok());
        assert!(s.replace_unless(b, "same".into(), &|v| v == "same").is_err());
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let s = store();
        s.next.store(u32::MAX, Ordering::SeqCst);
        assert_eq!(s.next_id().unwrap_err(), StoreError::IdsExhausted);
    }

    #[test]
    fn arc_wrapper_delegates() {
        let s = Arc::new(store());
        let id = RecordStore::<String>::next_id(&s).unwrap();
        RecordStore::<String>::insert(&s, id, "v".to_string()).unwrap();
        assert_eq!(RecordStore::<String>::get(&s, id).unwrap().as_deref(), Some("v"));
    }
}
