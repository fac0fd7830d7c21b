use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use homeshare_core::HouseholdId;

use super::StoreError;

/// Household-isolated key/value storage backing the in-memory stores.
///
/// Records of one household are never visible through another household's id.
pub trait HouseholdStore<K, V>: Send + Sync {
    fn get(&self, household_id: HouseholdId, key: &K) -> Result<Option<V>, StoreError>;
    /// Insert only if `key` is not present yet.
    fn insert_new(&self, household_id: HouseholdId, key: K, value: V) -> Result<(), StoreError>;
    /// Swap in `value` only while the stored record still equals `expected`.
    fn replace_if(&self, household_id: HouseholdId, key: K, expected: &V, value: V) -> Result<(), StoreError>
    where
        V: PartialEq;
    fn list(&self, household_id: HouseholdId) -> Result<Vec<V>, StoreError>;
}

/// In-memory household-isolated store for tests/dev.
#[derive(Debug)]
pub struct InMemoryHouseholdStore<K, V> {
    inner: RwLock<HashMap<(HouseholdId, K), V>>,
}

impl<K, V> InMemoryHouseholdStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryHouseholdStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> HouseholdStore<K, V> for InMemoryHouseholdStore<K, V>
where
    K: Clone + Eq + Hash + core::fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, household_id: HouseholdId, key: &K) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned())?;
        Ok(map.get(&(household_id, key.clone())).cloned())
    }

    fn insert_new(&self, household_id: HouseholdId, key: K, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::poisoned())?;
        let slot = (household_id, key);
        if map.contains_key(&slot) {
            return Err(StoreError::Conflict(format!("record {:?} already exists", slot.1)));
        }
        map.insert(slot, value);
        Ok(())
    }

    fn replace_if(&self, household_id: HouseholdId, key: K, expected: &V, value: V) -> Result<(), StoreError>
    where
        V: PartialEq,
    {
        let mut map = self.inner.write().map_err(|_| StoreError::poisoned())?;
        match map.get_mut(&(household_id, key.clone())) {
            Some(current) if *current == *expected => {
                *current = value;
                Ok(())
            }
            Some(_) => Err(StoreError::Conflict(format!("record {key:?} was modified concurrently"))),
            None => Err(StoreError::NotFound(format!("record {key:?}"))),
        }
    }

    fn list(&self, household_id: HouseholdId) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned())?;
        Ok(map
            .iter()
            .filter_map(|((h, _k), v)| if *h == household_id { Some(v.clone()) } else { None })
            .collect())
    }
}
