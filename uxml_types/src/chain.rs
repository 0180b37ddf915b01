// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precomputed type ancestry.

use smallvec::SmallVec;

use crate::tag::TypeTag;

/// Hierarchies deeper than this spill to the heap.
const INLINE_DEPTH: usize = 8;

/// The ordered set of nominal types an element satisfies.
///
/// Entries run from most-derived to base. Membership checks first consult a
/// 64-bit mask (one bit per `tag % 64`) so that the common "not a member"
/// answer never touches the list; hierarchies are shallow, so the confirming
/// scan is short.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeChain {
    tags: SmallVec<[TypeTag; INLINE_DEPTH]>,
    mask: u64,
}

impl TypeChain {
    /// Builds a chain from tags ordered most-derived first.
    ///
    /// # Panics
    ///
    /// Panics if `tags` is empty.
    #[must_use]
    pub fn from_tags(tags: impl IntoIterator<Item = TypeTag>) -> Self {
        let tags: SmallVec<[TypeTag; INLINE_DEPTH]> = tags.into_iter().collect();
        assert!(!tags.is_empty(), "a type chain needs at least one tag");
        let mask = tags.iter().fold(0, |m, t| m | t.mask_bit());
        Self { tags, mask }
    }

    /// The element's own (most-derived) type.
    #[must_use]
    #[inline]
    pub fn most_derived(&self) -> TypeTag {
        self.tags[0]
    }

    /// The root type of the hierarchy.
    #[must_use]
    #[inline]
    pub fn base(&self) -> TypeTag {
        self.tags[self.tags.len() - 1]
    }

    /// Number of types in the chain.
    #[must_use]
    #[inline]
    pub fn depth(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if the element is of type `tag` or a subtype of it.
    #[must_use]
    #[inline]
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.mask & tag.mask_bit() != 0 && self.tags.contains(&tag)
    }

    /// Distance from the most-derived type to `tag`, if present.
    #[must_use]
    pub fn position(&self, tag: TypeTag) -> Option<usize> {
        if self.mask & tag.mask_bit() == 0 {
            return None;
        }
        self.tags.iter().position(|t| *t == tag)
    }

    /// Iterates from most-derived to base.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = TypeTag> + '_ {
        self.tags.iter().copied()
    }

    /// Returns the tags as a slice, most-derived first.
    #[must_use]
    pub fn as_slice(&self) -> &[TypeTag] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn chain_order_and_membership() {
        let chain = TypeChain::from_tags([TypeTag::new(2), TypeTag::new(1), TypeTag::new(0)]);
        assert_eq!(chain.most_derived(), TypeTag::new(2));
        assert_eq!(chain.base(), TypeTag::new(0));
        assert_eq!(chain.depth(), 3);
        assert!(chain.contains(TypeTag::new(1)));
        assert!(!chain.contains(TypeTag::new(3)));
        assert_eq!(chain.position(TypeTag::new(0)), Some(2));
        assert_eq!(
            chain.iter().rev().collect::<Vec<_>>(),
            vec![TypeTag::new(0), TypeTag::new(1), TypeTag::new(2)]
        );
    }

    #[test]
    fn mask_collision_falls_back_to_scan() {
        // 64 and 0 share a mask bit.
        let chain = TypeChain::from_tags([TypeTag::new(64)]);
        assert!(!chain.contains(TypeTag::new(0)));
        assert!(chain.contains(TypeTag::new(64)));
    }

    #[test]
    #[should_panic(expected = "at least one tag")]
    fn empty_chain_rejected() {
        let _ = TypeChain::from_tags([]);
    }
}
