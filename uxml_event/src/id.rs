// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event handles and routing modes.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A runtime event identifier, indexing the registry's definition table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(u16);

impl EventId {
    /// Creates an event id from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventId").field(&self.0).finish()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

/// How a raised event travels through the element tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoutingStrategy {
    /// Only the source element.
    Direct,
    /// From the source up to the root.
    Bubble,
    /// From the root down to the source.
    DrillDown,
}

/// An event handle carrying its payload type.
///
/// Produced by [`EventRegistry::register`](crate::EventRegistry::register).
pub struct RoutedEvent<A> {
    id: EventId,
    routing: RoutingStrategy,
    _marker: PhantomData<fn() -> A>,
}

impl<A> RoutedEvent<A> {
    pub(crate) const fn new(id: EventId, routing: RoutingStrategy) -> Self {
        Self {
            id,
            routing,
            _marker: PhantomData,
        }
    }

    /// Returns the untyped id.
    #[must_use]
    #[inline]
    pub const fn id(self) -> EventId {
        self.id
    }

    /// Returns the routing strategy fixed at registration.
    #[must_use]
    #[inline]
    pub const fn routing(self) -> RoutingStrategy {
        self.routing
    }
}

impl<A> Copy for RoutedEvent<A> {}

impl<A> Clone for RoutedEvent<A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> PartialEq for RoutedEvent<A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for RoutedEvent<A> {}

impl<A> Hash for RoutedEvent<A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<A> fmt::Debug for RoutedEvent<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutedEvent")
            .field("id", &self.id)
            .field("routing", &self.routing)
            .field("args", &core::any::type_name::<A>())
            .finish()
    }
}
