// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Property: typed property definitions and per-element storage.
//!
//! ## Core Concepts
//!
//! ### Definitions
//!
//! A property definition is identified by its name, its owner type (a
//! [`TypeTag`](uxml_types::TypeTag)) and its value type. Definitions are
//! registered once in a [`PropertyRegistry`] and handed out as typed
//! [`Property<T>`] handles backed by a compact [`PropertyId`].
//!
//! Ordinary properties only apply to elements whose type chain contains the
//! owner type. Properties flagged [`PropertyFlags::ATTACHED`] apply to any
//! element; this is how containers impose layout hints on arbitrary children.
//! Storage is keyed by [`PropertyId`], so two attached properties that share a
//! name never collide.
//!
//! ### Storage
//!
//! [`PropertyStore`] holds only the values that were explicitly set. Reads of
//! unset properties fall back to the registered default and never touch the
//! store. Writes return a [`PropertyChange`] when, and only when, the effective
//! value changed.
//!
//! ## Quick Start
//!
//! ```rust
//! use uxml_property::{PropertyFlags, PropertyMetadataBuilder, PropertyRegistry, PropertyStore};
//! use uxml_types::TypeRegistry;
//!
//! let mut types = TypeRegistry::new();
//! let element = types.register("UxmlElement", None);
//!
//! let mut registry = PropertyRegistry::new();
//! let width = registry.register(
//!     &types,
//!     "Width",
//!     element,
//!     PropertyMetadataBuilder::new(0.0_f64)
//!         .flags(PropertyFlags::AFFECTS_LAYOUT)
//!         .build(),
//! );
//!
//! let mut store = PropertyStore::<u32>::new(1);
//! assert_eq!(store.get(width, &registry), 0.0);
//!
//! let change = store.set(width, 100.0, &registry).expect("value changed");
//! assert_eq!(change.old_value(width), Some(&0.0));
//! assert_eq!(change.new_value(width), Some(&100.0));
//!
//! // Writing the same value again is not a change.
//! assert!(store.set(width, 100.0, &registry).is_none());
//!
//! // Clearing reverts to the default.
//! assert!(store.clear(width, &registry).is_some());
//! assert_eq!(store.get(width, &registry), 0.0);
//! ```
//!
//! ## Memory Optimizations
//!
//! | Optimization | Description |
//! |--------------|-------------|
//! | **Sparse storage** | `PropertyStore` only allocates for explicitly set properties |
//! | **Shared defaults** | Default values live in the registry, not per element |
//! | **Inline storage** | `SmallVec` for small property counts |
//! | **`PropertyId` as u16** | Compact property identification |
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod change;
mod error;
mod flags;
mod id;
mod inherit;
mod metadata;
mod object;
mod registry;
mod store;
mod value;

pub use change::PropertyChange;
pub use error::PropertyError;
pub use flags::PropertyFlags;
pub use id::{Property, PropertyId};
pub use inherit::{ParentLookup, walk_inherited};
pub use metadata::{
    CoerceValueCallback, PropertyChangedCallback, PropertyMetadata, PropertyMetadataBuilder,
};
pub use object::{PropertyObject, PropertyObjectExt};
pub use registry::{PropertyRegistration, PropertyRegistry};
pub use store::PropertyStore;
pub use value::{ErasedValue, PropertyValue};
