// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Types: nominal type tags for elements.
//!
//! Element variants in UXML form a single-inheritance hierarchy
//! (`UxmlElement` → `Control` → `Button`, …). Rather than reflecting over a
//! live class hierarchy, every variant is registered once at startup in a
//! [`TypeRegistry`] and receives a compact [`TypeTag`]. An element captures
//! its [`TypeChain`] at construction: the ordered list of tags it satisfies,
//! from most-derived to base, plus a 64-bit membership mask for quick rejects.
//!
//! Property applicability, class-handler resolution and event definition
//! lookups all match against the precomputed chain.
//!
//! ```rust
//! use uxml_types::TypeRegistry;
//!
//! let mut types = TypeRegistry::new();
//! let element = types.register("UxmlElement", None);
//! let control = types.register("Control", Some(element));
//! let button = types.register("Button", Some(control));
//!
//! let chain = types.chain(button);
//! assert_eq!(chain.most_derived(), button);
//! assert!(chain.contains(element));
//! assert_eq!(chain.iter().collect::<Vec<_>>(), vec![button, control, element]);
//!
//! assert!(types.is_assignable(button, control));
//! assert!(!types.is_assignable(control, button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chain;
mod registry;
mod tag;

pub use chain::TypeChain;
pub use registry::{TypeError, TypeInfo, TypeRegistry};
pub use tag::TypeTag;
