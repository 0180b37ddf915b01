// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type registry.

use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::chain::TypeChain;
use crate::tag::TypeTag;

/// Errors raised while registering element types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A type with this name already exists.
    #[error("type '{0}' is already registered")]
    Duplicate(&'static str),
    /// The parent tag was not produced by this registry.
    #[error("parent {0} is not registered")]
    UnknownParent(TypeTag),
    /// The registry was sealed before this registration.
    #[error("type registry is sealed")]
    Sealed,
    /// The u16 tag space is exhausted.
    #[error("too many types registered (max {})", u16::MAX)]
    TooMany,
}

/// A registered type: its name and optional base type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    name: &'static str,
    parent: Option<TypeTag>,
}

impl TypeInfo {
    /// Returns the type name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the base type, if any.
    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<TypeTag> {
        self.parent
    }
}

/// Registry of nominal element types.
///
/// Types are registered once during startup, base types before derived ones.
/// After [`seal`](Self::seal) no further registrations are accepted.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    by_name: HashMap<&'static str, TypeTag>,
    sealed: bool,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, returning an error on misconfiguration.
    pub fn try_register(
        &mut self,
        name: &'static str,
        parent: Option<TypeTag>,
    ) -> Result<TypeTag, TypeError> {
        if self.sealed {
            return Err(TypeError::Sealed);
        }
        if self.by_name.contains_key(name) {
            return Err(TypeError::Duplicate(name));
        }
        if let Some(p) = parent
            && self.get(p).is_none()
        {
            return Err(TypeError::UnknownParent(p));
        }
        let index = u16::try_from(self.types.len()).map_err(|_| TypeError::TooMany)?;
        if index == u16::MAX {
            return Err(TypeError::TooMany);
        }
        let tag = TypeTag::new(index);
        self.types.push(TypeInfo { name, parent });
        self.by_name.insert(name, tag);
        log::debug!("registered type {name} as {tag:?} (parent {parent:?})");
        Ok(tag)
    }

    /// Registers a type.
    ///
    /// # Panics
    ///
    /// Panics on any [`TypeError`]; a broken type hierarchy is a startup bug.
    pub fn register(&mut self, name: &'static str, parent: Option<TypeTag>) -> TypeTag {
        match self.try_register(name, parent) {
            Ok(tag) => tag,
            Err(e) => panic!("{e}"),
        }
    }

    /// Forbids further registration.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Returns `true` once [`seal`](Self::seal) has been called.
    #[must_use]
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered types.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the registration for `tag`.
    #[must_use]
    pub fn get(&self, tag: TypeTag) -> Option<&TypeInfo> {
        self.types.get(tag.index() as usize)
    }

    /// Returns the name of `tag`.
    #[must_use]
    pub fn name(&self, tag: TypeTag) -> Option<&'static str> {
        self.get(tag).map(TypeInfo::name)
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<TypeTag> {
        self.by_name.get(name).copied()
    }

    /// Computes the chain for `tag`, most-derived first.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not registered.
    #[must_use]
    pub fn chain(&self, tag: TypeTag) -> TypeChain {
        let mut tags: SmallVec<[TypeTag; 8]> = SmallVec::new();
        let mut current = Some(tag);
        while let Some(t) = current {
            let info = self
                .get(t)
                .unwrap_or_else(|| panic!("{t:?} is not registered"));
            tags.push(t);
            current = info.parent;
        }
        TypeChain::from_tags(tags)
    }

    /// Returns `true` if `derived` is `base` or one of its subtypes.
    #[must_use]
    pub fn is_assignable(&self, derived: TypeTag, base: TypeTag) -> bool {
        let mut current = Some(derived);
        while let Some(t) = current {
            if t == base {
                return true;
            }
            current = self.get(t).and_then(TypeInfo::parent);
        }
        false
    }

    /// Returns `true` if either type derives from the other.
    #[must_use]
    pub fn related(&self, a: TypeTag, b: TypeTag) -> bool {
        self.is_assignable(a, b) || self.is_assignable(b, a)
    }

    /// Iterates over all registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeTag, &TypeInfo)> {
        self.types.iter().enumerate().map(|(i, info)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            let index = i as u16;
            (TypeTag::new(index), info)
        })
    }
}
