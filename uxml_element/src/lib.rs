// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Element: the retained element tree.
//!
//! An [`ElementTree`] owns every element of a UI: its type chain, optional
//! name, parent, content children, chrome subtree, property values and
//! instance listeners. It ties the lower crates together:
//!
//! - property reads and writes go through [`uxml_property`] with
//!   applicability checks against the element's type chain;
//! - effective changes raise the built-in `PropertyChanged` event through
//!   [`uxml_event`] routing;
//! - layout and render work is deferred into a [`uxml_update::UpdateQueue`]
//!   that the host drains once per frame.
//!
//! Handlers receive `&mut ElementTree`, so they may read and write properties
//! or restructure the tree while an event is being routed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod element;
mod error;
mod id;
mod registries;
mod tree;

pub use element::Element;
pub use error::ElementError;
pub use id::ElementId;
pub use registries::{PropertyChangedArgs, Registries};
pub use tree::{ElementArgs, ElementHandler, ElementTree, Raised};
