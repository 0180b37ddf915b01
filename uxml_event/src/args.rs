// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::id::{EventId, RoutedEvent};

/// Arguments carried along an event route.
///
/// `source` is the element the event was raised on; `current` is the element
/// whose handlers are running. Setting `handled` stops the route before the
/// next element.
#[derive(Clone, Debug)]
pub struct EventArgs<K, A> {
    /// The element the event was raised on.
    pub source: K,
    /// The element currently being visited.
    pub current: K,
    /// Set by a handler to stop further routing.
    pub handled: bool,
    /// Event-specific payload.
    pub payload: A,
    event: EventId,
}

impl<K: Copy, A> EventArgs<K, A> {
    /// Creates unhandled arguments for `event` raised on `source`.
    #[must_use]
    pub fn new(event: RoutedEvent<A>, source: K, payload: A) -> Self {
        Self {
            source,
            current: source,
            handled: false,
            payload,
            event: event.id(),
        }
    }

    /// The event being routed.
    #[must_use]
    #[inline]
    pub fn event(&self) -> EventId {
        self.event
    }
}
