// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Surface: the render side of an element tree.
//!
//! A [`SurfaceTree`] mirrors the visual part of a UI as nested surfaces.
//! Each surface has:
//!
//! - a layout rect in its parent's coordinate space,
//! - an append-only [`DisplayList`] of [`DisplayItem`]s in its own space,
//! - ordered children, painted back to front and hit tested front to back.
//!
//! Painting is a full pass over the tree into a host [`Canvas`]; there is no
//! damage tracking at this layer. [`RecordingCanvas`] captures the pass for
//! tests and debugging.
//!
//! Hit testing never falls through the root: a point that misses every
//! child targets the root surface, so input always has somewhere to go.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `peniko/std`.
//! - `libm`: forwards to `kurbo/libm` and `peniko/libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod canvas;
mod item;
mod tree;
mod types;

pub use canvas::{Canvas, CanvasOp, RecordingCanvas};
pub use item::{DisplayItem, DisplayList, Paint, Pen};
pub use tree::SurfaceTree;
pub use types::{SurfaceError, SurfaceFlags, SurfaceId};
