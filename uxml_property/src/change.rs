// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change records produced by effective-value transitions.

use crate::id::{Property, PropertyId};
use crate::value::ErasedValue;

/// The effective value of a property changed on one element.
///
/// Produced by [`PropertyStore::set`](crate::PropertyStore::set) and
/// [`PropertyStore::clear`](crate::PropertyStore::clear). Higher layers route
/// it as a property-changed notification.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChange {
    property: PropertyId,
    old: ErasedValue,
    new: ErasedValue,
}

impl PropertyChange {
    pub(crate) fn new(property: PropertyId, old: ErasedValue, new: ErasedValue) -> Self {
        Self { property, old, new }
    }

    /// The property whose value changed.
    #[must_use]
    #[inline]
    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Returns `true` if this change concerns `property`.
    #[must_use]
    #[inline]
    pub fn is<T>(&self, property: Property<T>) -> bool {
        self.property == property.id()
    }

    /// The previous effective value, typed by `property`.
    ///
    /// Returns `None` if the change is for a different property.
    #[must_use]
    pub fn old_value<T: 'static>(&self, property: Property<T>) -> Option<&T> {
        if self.is(property) {
            self.old.downcast_ref()
        } else {
            None
        }
    }

    /// The new effective value, typed by `property`.
    ///
    /// Returns `None` if the change is for a different property.
    #[must_use]
    pub fn new_value<T: 'static>(&self, property: Property<T>) -> Option<&T> {
        if self.is(property) {
            self.new.downcast_ref()
        } else {
            None
        }
    }

    /// The previous effective value, erased.
    #[must_use]
    pub fn old_erased(&self) -> &ErasedValue {
        &self.old
    }

    /// The new effective value, erased.
    #[must_use]
    pub fn new_erased(&self) -> &ErasedValue {
        &self.new
    }
}
