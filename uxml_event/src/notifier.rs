// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element listener lists.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::args::EventArgs;
use crate::handler::{DispatchReport, Handler, invoke_all};
use crate::id::{EventId, RoutedEvent};

/// Snapshot of an element's listeners for one event.
pub type Listeners<C, K, A> = SmallVec<[Handler<C, K, A>; 4]>;

/// Instance-level listeners of one element, keyed by event.
///
/// Listeners run in registration order. Adding the same handler (by `Rc`
/// identity) twice keeps a single entry.
///
/// ```rust
/// use uxml_event::{EventArgs, EventNotifier, EventRegistry, RoutingStrategy, handler};
/// use uxml_types::TypeRegistry;
///
/// let mut types = TypeRegistry::new();
/// let element = types.register("UxmlElement", None);
/// let mut events = EventRegistry::new();
/// let tap = events.register::<u8>("Tap", element, RoutingStrategy::Direct);
///
/// let mut notifier = EventNotifier::<Vec<u8>, u32>::new();
/// let record = handler(|log: &mut Vec<u8>, args: &mut EventArgs<u32, u8>| {
///     log.push(args.payload);
///     Ok(())
/// });
/// assert!(notifier.add(tap, record.clone()));
/// assert!(!notifier.add(tap, record.clone()));
///
/// let mut log = Vec::new();
/// let report = notifier.notify(tap, &mut log, &mut EventArgs::new(tap, 1, 9));
/// assert_eq!(report.invoked, 1);
/// assert_eq!(log, [9]);
/// ```
pub struct EventNotifier<C, K> {
    listeners: HashMap<EventId, SmallVec<[Box<dyn Any>; 2]>>,
    _marker: core::marker::PhantomData<fn(&mut C, K)>,
}

impl<C, K> Default for EventNotifier<C, K> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            _marker: core::marker::PhantomData,
        }
    }
}

impl<C: 'static, K: Copy + 'static> EventNotifier<C, K> {
    /// Creates a notifier with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `handler` for `event`. Returns `false` if it was already present.
    pub fn add<A: 'static>(&mut self, event: RoutedEvent<A>, handler: Handler<C, K, A>) -> bool {
        let list = self.listeners.entry(event.id()).or_default();
        if list
            .iter()
            .filter_map(|h| h.downcast_ref::<Handler<C, K, A>>())
            .any(|h| Rc::ptr_eq(h, &handler))
        {
            return false;
        }
        list.push(Box::new(handler));
        true
    }

    /// Removes `handler` from `event`. Returns `true` if it was present.
    pub fn remove<A: 'static>(&mut self, event: RoutedEvent<A>, handler: &Handler<C, K, A>) -> bool {
        let Some(list) = self.listeners.get_mut(&event.id()) else {
            return false;
        };
        let Some(pos) = list.iter().position(|h| {
            h.downcast_ref::<Handler<C, K, A>>()
                .is_some_and(|h| Rc::ptr_eq(h, handler))
        }) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.listeners.remove(&event.id());
        }
        true
    }

    /// Returns `true` if `event` has at least one listener.
    #[must_use]
    pub fn has_listeners(&self, event: EventId) -> bool {
        self.listeners.get(&event).is_some_and(|l| !l.is_empty())
    }

    /// Number of listeners for `event`.
    #[must_use]
    pub fn listener_count(&self, event: EventId) -> usize {
        self.listeners.get(&event).map_or(0, SmallVec::len)
    }

    /// Clones the listeners of `event`.
    ///
    /// Dispatch runs on a snapshot so handlers may add or remove listeners
    /// (or mutate the structure owning this notifier) while running.
    #[must_use]
    pub fn listeners<A: 'static>(&self, event: RoutedEvent<A>) -> Listeners<C, K, A> {
        self.listeners
            .get(&event.id())
            .into_iter()
            .flatten()
            .filter_map(|h| h.downcast_ref::<Handler<C, K, A>>().cloned())
            .collect()
    }

    /// Invokes every listener of `event` in registration order.
    ///
    /// A failing listener is logged and does not stop the others.
    pub fn notify<A: 'static>(
        &self,
        event: RoutedEvent<A>,
        ctx: &mut C,
        args: &mut EventArgs<K, A>,
    ) -> DispatchReport {
        invoke_all(&self.listeners(event), ctx, args)
    }

    /// Drops every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<C, K> core::fmt::Debug for EventNotifier<C, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.listeners.iter().map(|(id, l)| (id, l.len())))
            .finish()
    }
}
