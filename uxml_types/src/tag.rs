// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`TypeTag`] handle.

use core::fmt;

/// A registered nominal element type.
///
/// This is a lightweight handle (u16) assigned by
/// [`TypeRegistry::register`](crate::TypeRegistry::register). Tags are only
/// meaningful for the registry that produced them.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag(u16);

impl TypeTag {
    /// Creates a tag from a raw index.
    ///
    /// This is typically called by the registry rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }

    /// Bit used for this tag in a [`TypeChain`](crate::TypeChain) membership mask.
    #[inline]
    pub(crate) const fn mask_bit(self) -> u64 {
        1_u64 << (self.0 % 64)
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.0).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0)
    }
}
