//! Session-scoped registry of known stores.

use std::collections::HashMap;

use crate::id::StoreId;
use crate::store::Store;

/// Holds the current set of known stores and their static attributes.
///
/// The registry is replaced wholesale on each reload; it is never mutated
/// entry-by-entry. Consumers that need point-in-time consistency should read
/// the snapshot assembled from it, not the registry itself.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: Vec<Store>,
    index: HashMap<StoreId, usize>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full store set.
    ///
    /// Duplicate ids keep the first occurrence; later duplicates are dropped
    /// with a warning (a collaborator contract violation, not a fatal one).
    pub fn replace_all(&mut self, stores: Vec<Store>) {
        let mut deduped: Vec<Store> = Vec::with_capacity(stores.len());
        let mut index = HashMap::with_capacity(stores.len());

        for store in stores {
            if index.contains_key(&store.store_id()) {
                tracing::warn!(store = %store.store_id(), "duplicate store in registry reload, keeping first");
                continue;
            }
            index.insert(store.store_id(), deduped.len());
            deduped.push(store);
        }

        self.stores = deduped;
        self.index = index;
    }

    pub fn get(&self, id: StoreId) -> Option<&Store> {
        self.index.get(&id).map(|&i| &self.stores[i])
    }

    pub fn contains(&self, id: StoreId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Store> {
        self.stores.iter()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(name: &str) -> Store {
        Store::new(StoreId::new(), name, "Riyadh")
    }

    #[test]
    fn replace_all_swaps_the_full_set() {
        let mut registry = StoreRegistry::new();
        let first = test_store("Mall Branch");
        registry.replace_all(vec![first.clone()]);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(first.store_id()));

        let second = test_store("Airport Branch");
        registry.replace_all(vec![second.clone()]);
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(first.store_id()));
        assert_eq!(registry.get(second.store_id()), Some(&second));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut registry = StoreRegistry::new();
        let id = StoreId::new();
        let first = Store::new(id, "First", "Jeddah");
        let dup = Store::new(id, "Duplicate", "Dammam");

        registry.replace_all(vec![first.clone(), dup]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id), Some(&first));
    }

    #[test]
    fn empty_reload_clears_the_registry() {
        let mut registry = StoreRegistry::new();
        registry.replace_all(vec![test_store("Mall Branch")]);
        registry.replace_all(Vec::new());
        assert!(registry.is_empty());
    }
}
