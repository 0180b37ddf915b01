// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxml_types::TypeTag;

use crate::id::PropertyId;

/// Errors raised by property registration and writes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// The (name, owner) pair is already registered.
    #[error("property '{name}' is already registered on {owner}")]
    Duplicate {
        /// Property name.
        name: &'static str,
        /// Owner type.
        owner: TypeTag,
    },
    /// A related owner type already registered this name with another value type.
    #[error("property '{name}' conflicts with an existing definition of a different value type")]
    Incompatible {
        /// Property name.
        name: &'static str,
    },
    /// The registry was sealed before this registration.
    #[error("property registry is sealed")]
    Sealed,
    /// The u16 id space is exhausted.
    #[error("too many properties registered (max {})", u16::MAX)]
    TooMany,
    /// The id is not known to the registry.
    #[error("{0} is not registered")]
    Unregistered(PropertyId),
    /// A non-attached property was written on an element outside its owner type.
    #[error("property '{name}' does not apply to elements of type {element_type}")]
    NotApplicable {
        /// Property name.
        name: &'static str,
        /// The element's most-derived type.
        element_type: TypeTag,
    },
}
