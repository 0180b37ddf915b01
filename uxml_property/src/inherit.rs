// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent-chain lookup for inherited values.

use crate::id::Property;
use crate::store::PropertyStore;
use crate::value::PropertyValue;

/// Resolves an element key to its store and its parent key.
///
/// Closures of the shape `Fn(K) -> Option<(&PropertyStore<K>, Option<K>)>`
/// implement this trait.
pub trait ParentLookup<'a, K: Copy + Eq + 'a> {
    /// Looks up the store and parent key for `key`.
    fn lookup(&self, key: K) -> Option<(&'a PropertyStore<K>, Option<K>)>;
}

impl<'a, K, F> ParentLookup<'a, K> for F
where
    K: Copy + Eq + 'a,
    F: Fn(K) -> Option<(&'a PropertyStore<K>, Option<K>)>,
{
    #[inline]
    fn lookup(&self, key: K) -> Option<(&'a PropertyStore<K>, Option<K>)> {
        self(key)
    }
}

/// Returns the nearest explicitly set value, starting at `start`.
///
/// Only local values count; defaults of intermediate ancestors are skipped.
/// The walk stops at the first key the lookup does not know.
pub fn walk_inherited<'a, K, T, F>(
    start: Option<K>,
    property: Property<T>,
    lookup: &F,
) -> Option<&'a T>
where
    K: Copy + Eq + 'a,
    T: PropertyValue,
    F: ParentLookup<'a, K> + ?Sized,
{
    let mut current = start;
    while let Some(key) = current {
        let (store, parent) = lookup.lookup(key)?;
        if let Some(value) = store.get_local(property) {
            return Some(value);
        }
        current = parent;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyMetadataBuilder, PropertyRegistry};
    use alloc::vec::Vec;
    use uxml_types::TypeRegistry;

    #[test]
    fn nearest_ancestor_wins() {
        let mut types = TypeRegistry::new();
        let element = types.register("UxmlElement", None);
        let mut registry = PropertyRegistry::new();
        let size = registry.register(
            &types,
            "FontSize",
            element,
            PropertyMetadataBuilder::new(12.0_f64).inherits(true).build(),
        );

        // 0 <- 1 <- 2
        let mut stores: Vec<PropertyStore<usize>> = (0..3).map(PropertyStore::new).collect();
        stores[0].set(size, 20.0, &registry);
        stores[1].set(size, 16.0, &registry);
        let parents = [None, Some(0), Some(1)];
        let lookup = |k: usize| stores.get(k).map(|s| (s, parents[k]));

        assert_eq!(walk_inherited(Some(1), size, &lookup), Some(&16.0));
        assert_eq!(walk_inherited(Some(0), size, &lookup), Some(&20.0));
        assert_eq!(walk_inherited(None, size, &lookup), None);
    }

    #[test]
    fn unknown_key_stops_walk() {
        let mut types = TypeRegistry::new();
        let element = types.register("UxmlElement", None);
        let mut registry = PropertyRegistry::new();
        let size = registry.register(&types, "FontSize", element, PropertyMetadataBuilder::new(1_u8).build());
        let stores: Vec<PropertyStore<usize>> = Vec::new();
        let lookup = |k: usize| stores.get(k).map(|s| (s, None));
        assert_eq!(walk_inherited(Some(5), size, &lookup), None);
    }
}
