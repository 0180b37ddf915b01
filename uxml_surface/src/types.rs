// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface identifiers, flags and errors.

use core::fmt;

/// Generational handle of a surface in a [`SurfaceTree`](crate::SurfaceTree).
///
/// Slots start at generation `1` and bump it on reuse, so a handle to a
/// removed surface never aliases a newer one.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(u32, u32);

impl SurfaceId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({}v{})", self.0, self.1)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

bitflags::bitflags! {
    /// Per-surface participation in painting and hit testing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u8 {
        /// The surface and its subtree are painted.
        const VISIBLE  = 0b0000_0001;
        /// The surface and its subtree can be hit.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for SurfaceFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Errors raised by surface tree operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The handle refers to a removed surface.
    #[error("{0} is not alive")]
    Stale(SurfaceId),
    /// The root surface lives as long as its tree.
    #[error("the root surface cannot be removed")]
    RemoveRoot,
    /// Moving `surface` under `parent` would make it its own ancestor.
    #[error("moving {surface} under {parent} would create a cycle")]
    Cycle {
        /// The surface being moved.
        surface: SurfaceId,
        /// The requested parent.
        parent: SurfaceId,
    },
}
