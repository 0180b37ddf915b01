// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-bearing objects.
//!
//! [`PropertyObject`] exposes an element's store, key and type chain;
//! [`PropertyObjectExt`] layers checked reads and writes on top of it.

use uxml_types::TypeChain;

use crate::change::PropertyChange;
use crate::error::PropertyError;
use crate::id::Property;
use crate::inherit::{ParentLookup, walk_inherited};
use crate::registry::PropertyRegistry;
use crate::store::PropertyStore;
use crate::value::PropertyValue;

/// An object that holds property values.
///
/// ```rust
/// use uxml_property::{PropertyObject, PropertyStore};
/// use uxml_types::{TypeChain, TypeRegistry};
///
/// struct Node {
///     key: u32,
///     parent: Option<u32>,
///     chain: TypeChain,
///     store: PropertyStore<u32>,
/// }
///
/// impl PropertyObject<u32> for Node {
///     fn property_store(&self) -> &PropertyStore<u32> { &self.store }
///     fn property_store_mut(&mut self) -> &mut PropertyStore<u32> { &mut self.store }
///     fn key(&self) -> u32 { self.key }
///     fn parent_key(&self) -> Option<u32> { self.parent }
///     fn type_chain(&self) -> &TypeChain { &self.chain }
/// }
/// ```
pub trait PropertyObject<K: Copy + Eq> {
    /// The object's property store.
    fn property_store(&self) -> &PropertyStore<K>;

    /// The object's property store, mutably.
    fn property_store_mut(&mut self) -> &mut PropertyStore<K>;

    /// The key identifying this object.
    fn key(&self) -> K;

    /// The parent's key, used for inheritance.
    fn parent_key(&self) -> Option<K>;

    /// The object's type chain, most-derived first.
    fn type_chain(&self) -> &TypeChain;
}

/// Checked property access for [`PropertyObject`]s.
pub trait PropertyObjectExt<K: Copy + Eq>: PropertyObject<K> {
    /// The effective value (local or default).
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry`.
    fn get_value<T: PropertyValue>(&self, property: Property<T>, registry: &PropertyRegistry) -> T {
        self.property_store().get(property, registry)
    }

    /// The local value only.
    fn get_local_value<'a, T: PropertyValue>(&'a self, property: Property<T>) -> Option<&'a T>
    where
        K: 'a,
    {
        self.property_store().get_local(property)
    }

    /// Writes `value` after checking that `property` applies to this object.
    ///
    /// Returns the change record if the effective value changed.
    fn set_value<T: PropertyValue>(
        &mut self,
        property: Property<T>,
        value: T,
        registry: &PropertyRegistry,
    ) -> Result<Option<PropertyChange>, PropertyError> {
        registry.check_applicable(property.id(), self.type_chain())?;
        Ok(self.property_store_mut().set(property, value, registry))
    }

    /// Removes the local value.
    ///
    /// Returns the change record if the effective value changed.
    fn clear_value<T: PropertyValue>(
        &mut self,
        property: Property<T>,
        registry: &PropertyRegistry,
    ) -> Result<Option<PropertyChange>, PropertyError> {
        registry.check_applicable(property.id(), self.type_chain())?;
        Ok(self.property_store_mut().clear(property, registry))
    }

    /// The effective value with inheritance.
    ///
    /// Local value first; then, if the property inherits, the nearest
    /// ancestor's local value; then the default.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry`.
    fn get_inherited<'a, T, F>(
        &'a self,
        property: Property<T>,
        registry: &PropertyRegistry,
        lookup: &F,
    ) -> T
    where
        K: 'a,
        T: PropertyValue,
        F: ParentLookup<'a, K> + ?Sized,
    {
        if let Some(value) = self.property_store().get_local(property) {
            return value.clone();
        }
        let Some(metadata) = registry.metadata(property) else {
            panic!("{:?} not found in registry", property.id());
        };
        if metadata.inherits()
            && let Some(value) = walk_inherited(self.parent_key(), property, lookup)
        {
            return value.clone();
        }
        metadata.default_value().clone()
    }
}

impl<K: Copy + Eq, O: PropertyObject<K> + ?Sized> PropertyObjectExt<K> for O {}
