// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxml_property::PropertyError;

use crate::id::ElementId;

/// Errors raised by element tree operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// The handle refers to a removed element.
    #[error("{0} is not alive")]
    Stale(ElementId),
    /// A property read or write was rejected.
    #[error(transparent)]
    Property(#[from] PropertyError),
    /// Attaching `child` under `parent` would create a cycle.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle {
        /// Prospective parent.
        parent: ElementId,
        /// Prospective child.
        child: ElementId,
    },
}
