use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use winnerlens_core::UserId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage cannot serve requests (e.g. a writer panicked mid-update).
    #[error("product store unavailable")]
    Unavailable,
}

/// Owner-isolated key/value store.
///
/// Every record belongs to exactly one account; lookups with a different owner
/// behave as if the record did not exist.
pub trait OwnerStore<K, V>: Send + Sync {
    fn get(&self, owner: UserId, key: &K) -> Result<Option<V>, StoreError>;
    fn upsert(&self, owner: UserId, key: K, value: V) -> Result<(), StoreError>;
    fn list(&self, owner: UserId) -> Result<Vec<V>, StoreError>;
    /// Returns the removed value, if any.
    fn remove(&self, owner: UserId, key: &K) -> Result<Option<V>, StoreError>;

    /// Run `f` against the stored value while holding the write lock.
    ///
    /// The value is only written back when `f` returns `Ok`. The outer `Option`
    /// is `None` when the key does not exist for `owner`.
    fn try_modify<R, E>(
        &self,
        owner: UserId,
        key: &K,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Result<Option<Result<R, E>>, StoreError>;
}

impl<K, V, S> OwnerStore<K, V> for Arc<S>
where
    S: OwnerStore<K, V>,
{
    fn get(&self, owner: UserId, key: &K) -> Result<Option<V>, StoreError> {
        (**self).get(owner, key)
    }

    fn upsert(&self, owner: UserId, key: K, value: V) -> Result<(), StoreError> {
        (**self).upsert(owner, key, value)
    }

    fn list(&self, owner: UserId) -> Result<Vec<V>, StoreError> {
        (**self).list(owner)
    }

    fn remove(&self, owner: UserId, key: &K) -> Result<Option<V>, StoreError> {
        (**self).remove(owner, key)
    }

    fn try_modify<R, E>(
        &self,
        owner: UserId,
        key: &K,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Result<Option<Result<R, E>>, StoreError> {
        (**self).try_modify(owner, key, f)
    }
}

/// In-memory owner-isolated store for tests/dev.
///
/// A poisoned lock is reported as [`StoreError::Unavailable`].
#[derive(Debug)]
pub struct InMemoryOwnerStore<K, V> {
    inner: RwLock<HashMap<(UserId, K), V>>,
}

impl<K, V> InMemoryOwnerStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryOwnerStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OwnerStore<K, V> for InMemoryOwnerStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, owner: UserId, key: &K) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        Ok(map.get(&(owner, key.clone())).cloned())
    }

    fn upsert(&self, owner: UserId, key: K, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        map.insert((owner, key), value);
        Ok(())
    }

    fn list(&self, owner: UserId) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        Ok(map
            .iter()
            .filter_map(|((o, _k), v)| if *o == owner { Some(v.clone()) } else { None })
            .collect())
    }

    fn remove(&self, owner: UserId, key: &K) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        Ok(map.remove(&(owner, key.clone())))
    }

    fn try_modify<R, E>(
        &self,
        owner: UserId,
        key: &K,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Result<Option<Result<R, E>>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        let Some(slot) = map.get_mut(&(owner, key.clone())) else {
            return Ok(None);
        };

        let mut draft = slot.clone();
        let result = f(&mut draft);
        if result.is_ok() {
            *slot = draft;
        }
        Ok(Some(result))
    }
}
