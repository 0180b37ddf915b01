// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Geometry: tight bounding boxes of Bezier curves.
//!
//! The bounds of a curve are the bounds of its end points and of every
//! interior extremum, found at the roots of the curve's derivative in
//! `(0, 1)`. Control points only matter through those extrema, so the result
//! is tighter than the control polygon's box.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use uxml_geometry::quad_bounds;
//!
//! let r = quad_bounds(Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 0.0));
//! assert_eq!(r, Rect::new(0.0, 0.0, 2.0, 1.0));
//! ```
//!
//! Denominators smaller than [`EPSILON`] are treated as degenerate and the
//! extremum on that axis is skipped, so flat or collinear configurations
//! never produce NaN or infinite bounds.
//!
//! ## Features
//!
//! - `std` (default): use the standard library float functions.
//! - `libm`: use `libm` through `kurbo` in `no_std` builds.

#![no_std]

mod bezier;

pub use bezier::{EPSILON, cubic_bounds, path_bounds, quad_bounds};
