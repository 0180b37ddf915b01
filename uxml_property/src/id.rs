// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property handles.
//!
//! [`PropertyId`] is the arena-style index assigned at registration time and
//! [`Property<T>`] is its typed wrapper.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A runtime property identifier.
///
/// Assigned sequentially by [`PropertyRegistry`](crate::PropertyRegistry), so it
/// doubles as an index into the registry's definition table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Creates a property id from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

/// A property handle carrying its value type.
///
/// Handles are produced by
/// [`PropertyRegistry::register`](crate::PropertyRegistry::register), which
/// guarantees that the id was registered with value type `T`. Getting or
/// setting through the handle is therefore checked at compile time:
///
/// ```rust
/// use uxml_property::{Property, PropertyMetadataBuilder, PropertyRegistry};
/// use uxml_types::TypeRegistry;
///
/// let mut types = TypeRegistry::new();
/// let element = types.register("UxmlElement", None);
/// let mut registry = PropertyRegistry::new();
///
/// let opacity: Property<f64> =
///     registry.register(&types, "Opacity", element, PropertyMetadataBuilder::new(1.0).build());
/// // store.set(opacity, "half", &registry); // does not compile
/// # let _ = opacity;
/// ```
pub struct Property<T> {
    id: PropertyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    /// Wraps an id. The caller must ensure it was registered with type `T`;
    /// a mismatch makes typed reads fall back to `None`/defaults.
    #[must_use]
    #[inline]
    pub const fn from_id(id: PropertyId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the untyped id.
    #[must_use]
    #[inline]
    pub const fn id(self) -> PropertyId {
        self.id
    }
}

impl<T> Copy for Property<T> {}

impl<T> Clone for Property<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Property<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Property<T> {}

impl<T> Hash for Property<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
