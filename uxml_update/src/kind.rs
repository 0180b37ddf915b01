// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Identifies the handler a deferred update is destined for.
///
/// The first few values are reserved for the built-in passes; applications
/// define their own kinds from [`UpdateKind::USER`] upward.
///
/// ```
/// use uxml_update::UpdateKind;
///
/// const SCROLL_INTO_VIEW: UpdateKind = UpdateKind::new(UpdateKind::USER.index() + 1);
/// assert_ne!(SCROLL_INTO_VIEW, UpdateKind::LAYOUT);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpdateKind(u8);

impl UpdateKind {
    /// Recompute surface geometry from layout properties.
    pub const LAYOUT: Self = Self(0);
    /// Rebuild display lists from visual properties.
    pub const RENDER: Self = Self(1);
    /// First kind free for application use.
    pub const USER: Self = Self(8);

    /// Creates a kind from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LAYOUT => f.write_str("UpdateKind::LAYOUT"),
            Self::RENDER => f.write_str("UpdateKind::RENDER"),
            Self(n) => f.debug_tuple("UpdateKind").field(&n).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn debug_names_builtins() {
        assert_eq!(format!("{:?}", UpdateKind::LAYOUT), "UpdateKind::LAYOUT");
        assert_eq!(format!("{:?}", UpdateKind::new(9)), "UpdateKind(9)");
    }
}
