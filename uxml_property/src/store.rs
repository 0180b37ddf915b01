// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element sparse property storage.
//!
//! Entries are kept in a vector sorted by [`PropertyId`] and found by binary
//! search. Elements typically set a handful of properties, so this beats a
//! hash map on both memory and lookup time, and the first few entries live
//! inline in a `SmallVec`.

use smallvec::SmallVec;

use crate::change::PropertyChange;
use crate::id::{Property, PropertyId};
use crate::registry::PropertyRegistry;
use crate::value::{ErasedValue, PropertyValue};

/// Most elements set fewer than this many properties.
const INLINE_CAPACITY: usize = 8;

/// Explicitly set property values of one element.
///
/// Reads of unset properties return the registry default without touching
/// the store. [`set`](Self::set) and [`clear`](Self::clear) report a
/// [`PropertyChange`] only when the effective value changes.
///
/// ```rust
/// use uxml_property::{PropertyMetadata, PropertyRegistry, PropertyStore};
/// use uxml_types::TypeRegistry;
///
/// let mut types = TypeRegistry::new();
/// let element = types.register("UxmlElement", None);
/// let mut registry = PropertyRegistry::new();
/// let opacity = registry.register(&types, "Opacity", element, PropertyMetadata::new(1.0_f64));
///
/// let mut store = PropertyStore::new(7_u32);
/// assert!(store.set(opacity, 1.0, &registry).is_none()); // already the default
/// assert!(store.is_empty());
///
/// assert!(store.set(opacity, 0.5, &registry).is_some());
/// assert_eq!(store.get(opacity, &registry), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PropertyStore<K> {
    entries: SmallVec<[(PropertyId, ErasedValue); INLINE_CAPACITY]>,
    owner: K,
}

impl<K: Copy + Eq> PropertyStore<K> {
    /// Creates an empty store for `owner`.
    #[must_use]
    pub fn new(owner: K) -> Self {
        Self {
            entries: SmallVec::new(),
            owner,
        }
    }

    /// The key of the owning element.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> K {
        self.owner
    }

    /// Returns `true` if nothing is set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of explicitly set properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ids of the explicitly set properties, ascending.
    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    #[inline]
    fn find(&self, id: PropertyId) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&id, |(pid, _)| *pid)
    }

    /// The explicitly set value, if any.
    #[must_use]
    #[inline]
    pub fn get_local<T: PropertyValue>(&self, property: Property<T>) -> Option<&T> {
        self.get_erased(property.id())
            .and_then(ErasedValue::downcast_ref)
    }

    /// The explicitly set value of `id`, erased.
    #[must_use]
    pub fn get_erased(&self, id: PropertyId) -> Option<&ErasedValue> {
        self.find(id).ok().map(|idx| &self.entries[idx].1)
    }

    /// Returns `true` if `property` has an explicit value.
    #[must_use]
    #[inline]
    pub fn has_local<T>(&self, property: Property<T>) -> bool {
        self.find(property.id()).is_ok()
    }

    /// The effective value: the local value or the registry default, borrowed.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry`.
    #[must_use]
    pub fn get_ref<'a, T: PropertyValue>(
        &'a self,
        property: Property<T>,
        registry: &'a PropertyRegistry,
    ) -> &'a T {
        if let Some(v) = self.get_local(property) {
            return v;
        }
        match registry.metadata(property) {
            Some(metadata) => metadata.default_value(),
            None => panic!("{:?} not found in registry", property.id()),
        }
    }

    /// The effective value: the local value or the registry default.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry`.
    #[must_use]
    pub fn get<T: PropertyValue>(&self, property: Property<T>, registry: &PropertyRegistry) -> T {
        self.get_ref(property, registry).clone()
    }

    /// Stores `value` (after coercion).
    ///
    /// Returns the change record if the effective value changed. Writing the
    /// current effective value is a no-op: nothing is stored, no callback runs
    /// and `None` is returned.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry`.
    pub fn set<T: PropertyValue>(
        &mut self,
        property: Property<T>,
        value: T,
        registry: &PropertyRegistry,
    ) -> Option<PropertyChange> {
        let Some(metadata) = registry.metadata(property) else {
            panic!("{:?} not found in registry", property.id());
        };
        let value = metadata.coerce(value);
        let old = self.get_ref(property, registry);
        if *old == value {
            return None;
        }
        let old = old.clone();
        metadata.on_changed(&old, &value);
        let change = PropertyChange::new(
            property.id(),
            ErasedValue::new(old),
            ErasedValue::new(value.clone()),
        );
        match self.find(property.id()) {
            Ok(idx) => self.entries[idx].1 = ErasedValue::new(value),
            Err(idx) => self
                .entries
                .insert(idx, (property.id(), ErasedValue::new(value))),
        }
        Some(change)
    }

    /// Removes the explicit value, reverting to the default.
    ///
    /// Returns the change record if the effective value changed.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry`.
    pub fn clear<T: PropertyValue>(
        &mut self,
        property: Property<T>,
        registry: &PropertyRegistry,
    ) -> Option<PropertyChange> {
        let idx = self.find(property.id()).ok()?;
        let (_, removed) = self.entries.remove(idx);
        let Some(metadata) = registry.metadata(property) else {
            panic!("{:?} not found in registry", property.id());
        };
        let default = metadata.default_value();
        let old = removed.downcast_ref::<T>()?;
        if old == default {
            return None;
        }
        metadata.on_changed(old, default);
        Some(PropertyChange::new(
            property.id(),
            removed.clone(),
            ErasedValue::new(default.clone()),
        ))
    }

    /// Removes every explicit value. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }
}
