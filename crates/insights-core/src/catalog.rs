#![forbid(unsafe_code)]

//! Immutable, ordered record catalogs.
//!
//! A [`Catalog`] is built once and never mutated. Construction rejects
//! duplicate identifiers, so every lookup by id is unambiguous and a
//! selection that references an id always references exactly one record.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

use crate::error::{CatalogError, Result};

/// A record that can live in a [`Catalog`].
pub trait Record {
    /// Identifier, unique within the owning catalog.
    fn id(&self) -> &str;
}

/// Fixed, ordered collection of records for one dashboard module.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    name: &'static str,
    items: Vec<T>,
}

impl<T: Record> Catalog<T> {
    /// Build a catalog, failing on the first repeated identifier.
    pub fn new(name: &'static str, items: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(CatalogError::DuplicateId {
                    catalog: name,
                    id: item.id().to_string(),
                });
            }
        }
        tracing::debug!(catalog = name, len = items.len(), "catalog built");
        Ok(Self { name, items })
    }

    /// An empty catalog.
    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    /// Catalog name used in logs and errors.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record at `index` in catalog order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Record with the given identifier.
    pub fn by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Catalog position of the given identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Whether a record with this identifier exists.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Identifiers in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Record::id)
    }

    /// All records as a slice, in catalog order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Catalog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Item(pub(crate) String);

    impl Record for Item {
        fn id(&self) -> &str {
            &self.0
        }
    }

    pub(crate) fn items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item((*id).to_string())).collect()
    }

    #[test]
    fn preserves_order_and_lookups() {
        let catalog = Catalog::new("test", items(&["b", "a", "c"])).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(catalog.position("a"), Some(1));
        assert_eq!(catalog.by_id("c"), Some(&Item("c".into())));
        assert!(catalog.by_id("z").is_none());
        assert!(!catalog.contains("z"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new("test", items(&["1", "2", "1"])).unwrap_err();
        match err {
            CatalogError::DuplicateId { catalog, id } => {
                assert_eq!(catalog, "test");
                assert_eq!(id, "1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_catalog() {
        let catalog: Catalog<Item> = Catalog::empty("none");
        assert!(catalog.is_empty());
        assert!(catalog.get(0).is_none());
        assert_eq!(catalog.name(), "none");
    }
}
