// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property metadata and its builder.

use alloc::boxed::Box;

use crate::flags::PropertyFlags;
use crate::value::PropertyValue;

/// Callback invoked after the effective value changed: `(old, new)`.
pub type PropertyChangedCallback<T> = Box<dyn Fn(&T, &T)>;

/// Callback that adjusts a proposed value before it is stored.
pub type CoerceValueCallback<T> = Box<dyn Fn(T) -> T>;

/// Static configuration of a property definition.
///
/// ```rust
/// use uxml_property::{PropertyFlags, PropertyMetadataBuilder};
///
/// let metadata = PropertyMetadataBuilder::new(1.0_f64)
///     .flags(PropertyFlags::AFFECTS_RENDER)
///     .coerce(|v| v.clamp(0.0, 1.0))
///     .build();
///
/// assert_eq!(metadata.default_value(), &1.0);
/// assert_eq!(metadata.coerce(3.0), 1.0);
/// assert!(metadata.flags().contains(PropertyFlags::AFFECTS_RENDER));
/// ```
pub struct PropertyMetadata<T: PropertyValue> {
    default_value: T,
    flags: PropertyFlags,
    inherits: bool,
    changed_callback: Option<PropertyChangedCallback<T>>,
    coerce_callback: Option<CoerceValueCallback<T>>,
}

impl<T: PropertyValue> PropertyMetadata<T> {
    /// Metadata with only a default value.
    #[must_use]
    pub fn new(default_value: T) -> Self {
        PropertyMetadataBuilder::new(default_value).build()
    }

    /// The value read for elements that never set this property.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Definition flags.
    #[must_use]
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Whether unset values are looked up along the parent chain.
    #[must_use]
    #[inline]
    pub fn inherits(&self) -> bool {
        self.inherits
    }

    /// Runs the changed callback, if any.
    #[inline]
    pub fn on_changed(&self, old_value: &T, new_value: &T) {
        if let Some(callback) = &self.changed_callback {
            callback(old_value, new_value);
        }
    }

    /// Applies the coerce callback, if any.
    #[inline]
    pub fn coerce(&self, value: T) -> T {
        match &self.coerce_callback {
            Some(callback) => callback(value),
            None => value,
        }
    }
}

impl<T: PropertyValue> core::fmt::Debug for PropertyMetadata<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyMetadata")
            .field("default_value", &self.default_value)
            .field("flags", &self.flags)
            .field("inherits", &self.inherits)
            .field("has_changed_callback", &self.changed_callback.is_some())
            .field("has_coerce_callback", &self.coerce_callback.is_some())
            .finish()
    }
}

/// Builder for [`PropertyMetadata`].
pub struct PropertyMetadataBuilder<T: PropertyValue> {
    metadata: PropertyMetadata<T>,
}

impl<T: PropertyValue> core::fmt::Debug for PropertyMetadataBuilder<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyMetadataBuilder")
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl<T: PropertyValue> PropertyMetadataBuilder<T> {
    /// Starts a builder with the given default value.
    #[must_use]
    pub fn new(default_value: T) -> Self {
        Self {
            metadata: PropertyMetadata {
                default_value,
                flags: PropertyFlags::empty(),
                inherits: false,
                changed_callback: None,
                coerce_callback: None,
            },
        }
    }

    /// Replaces the definition flags.
    #[must_use]
    pub fn flags(mut self, flags: PropertyFlags) -> Self {
        self.metadata.flags = flags;
        self
    }

    /// Shorthand for adding [`PropertyFlags::ATTACHED`].
    #[must_use]
    pub fn attached(mut self) -> Self {
        self.metadata.flags |= PropertyFlags::ATTACHED;
        self
    }

    /// Sets whether unset values are inherited from ancestors.
    #[must_use]
    pub fn inherits(mut self, inherits: bool) -> Self {
        self.metadata.inherits = inherits;
        self
    }

    /// Sets the changed callback.
    #[must_use]
    pub fn on_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T, &T) + 'static,
    {
        self.metadata.changed_callback = Some(Box::new(callback));
        self
    }

    /// Sets the coerce callback.
    #[must_use]
    pub fn coerce<F>(mut self, callback: F) -> Self
    where
        F: Fn(T) -> T + 'static,
    {
        self.metadata.coerce_callback = Some(Box::new(callback));
        self
    }

    /// Finishes the metadata.
    #[must_use]
    pub fn build(self) -> PropertyMetadata<T> {
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn defaults() {
        let metadata = PropertyMetadata::new(42_i32);
        assert_eq!(metadata.default_value(), &42);
        assert!(metadata.flags().is_empty());
        assert!(!metadata.inherits());
        assert_eq!(metadata.coerce(7), 7);
    }

    #[test]
    fn attached_adds_flag() {
        let metadata = PropertyMetadataBuilder::new(0_u8)
            .flags(PropertyFlags::AFFECTS_LAYOUT)
            .attached()
            .build();
        assert!(metadata.flags().contains(PropertyFlags::ATTACHED));
        assert!(metadata.flags().contains(PropertyFlags::AFFECTS_LAYOUT));
    }

    #[test]
    fn changed_callback_sees_old_and_new() {
        let seen = Rc::new(Cell::new((0, 0)));
        let seen_in = seen.clone();
        let metadata = PropertyMetadataBuilder::new(0_i32)
            .on_changed(move |old, new| seen_in.set((*old, *new)))
            .build();
        metadata.on_changed(&1, &2);
        assert_eq!(seen.get(), (1, 2));
    }

    #[test]
    fn debug_mentions_callbacks() {
        let metadata = PropertyMetadataBuilder::new(1_u8).coerce(|v| v).build();
        let debug = format!("{metadata:?}");
        assert!(debug.contains("has_coerce_callback: true"));
    }
}
