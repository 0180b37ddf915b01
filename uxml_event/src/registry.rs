// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event definitions and class handlers.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use hashbrown::HashMap;
use smallvec::SmallVec;
use uxml_types::{TypeChain, TypeRegistry, TypeTag};

use crate::args::EventArgs;
use crate::error::{EventError, HandlerError};
use crate::handler::Handler;
use crate::id::{EventId, RoutedEvent, RoutingStrategy};

/// A registered event definition.
#[derive(Clone, Debug)]
pub struct EventDefinition {
    name: &'static str,
    owner: TypeTag,
    routing: RoutingStrategy,
    args_type: TypeId,
}

impl EventDefinition {
    /// Event name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declaring type.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> TypeTag {
        self.owner
    }

    /// Routing strategy.
    #[must_use]
    #[inline]
    pub fn routing(&self) -> RoutingStrategy {
        self.routing
    }

    /// [`TypeId`] of the payload type.
    #[must_use]
    #[inline]
    pub fn args_type(&self) -> TypeId {
        self.args_type
    }
}

/// Registry of event definitions and type-level (class) handlers.
///
/// ```rust
/// use uxml_event::{EventArgs, EventRegistry, RoutingStrategy};
/// use uxml_types::TypeRegistry;
///
/// let mut types = TypeRegistry::new();
/// let element = types.register("UxmlElement", None);
/// let button = types.register("Button", Some(element));
///
/// let mut events = EventRegistry::new();
/// let click = events.register::<()>("Click", element, RoutingStrategy::Direct);
/// events.add_class_handler(click, element, |count: &mut u32, _: &mut EventArgs<u32, ()>| {
///     *count += 1;
///     Ok(())
/// });
///
/// let handler = events.class_handler::<u32, u32, ()>(click, &types.chain(button)).unwrap();
/// let mut count = 0;
/// let mut args = EventArgs::new(click, 7, ());
/// handler(&mut count, &mut args).unwrap();
/// assert_eq!(count, 1);
/// ```
#[derive(Default)]
pub struct EventRegistry {
    events: Vec<EventDefinition>,
    by_name: HashMap<&'static str, SmallVec<[EventId; 2]>>,
    class_handlers: HashMap<(EventId, TypeTag), SmallVec<[Box<dyn Any>; 1]>>,
    sealed: bool,
}

impl EventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an event, returning an error on misconfiguration.
    pub fn try_register<A: 'static>(
        &mut self,
        name: &'static str,
        owner: TypeTag,
        routing: RoutingStrategy,
    ) -> Result<RoutedEvent<A>, EventError> {
        if self.sealed {
            return Err(EventError::Sealed);
        }
        if self
            .by_name
            .get(name)
            .into_iter()
            .flatten()
            .any(|id| self.events[id.index() as usize].owner == owner)
        {
            return Err(EventError::Duplicate { name, owner });
        }
        let index = u16::try_from(self.events.len()).map_err(|_| EventError::TooMany)?;
        let id = EventId::new(index);
        log::debug!("registered {routing:?} event {name} on {owner:?} as {id:?}");
        self.events.push(EventDefinition {
            name,
            owner,
            routing,
            args_type: TypeId::of::<A>(),
        });
        self.by_name.entry(name).or_default().push(id);
        Ok(RoutedEvent::new(id, routing))
    }

    /// Registers an event.
    ///
    /// # Panics
    ///
    /// Panics on any [`EventError`].
    pub fn register<A: 'static>(
        &mut self,
        name: &'static str,
        owner: TypeTag,
        routing: RoutingStrategy,
    ) -> RoutedEvent<A> {
        match self.try_register(name, owner, routing) {
            Ok(e) => e,
            Err(e) => panic!("{e}"),
        }
    }

    /// Adds a type-level handler for `event` on `target_type`.
    ///
    /// Class handlers run before instance listeners at every element whose
    /// type chain resolves to `target_type`; see [`class_handler`](Self::class_handler).
    pub fn try_add_class_handler<C, K, A, F>(
        &mut self,
        event: RoutedEvent<A>,
        target_type: TypeTag,
        handler: F,
    ) -> Result<(), EventError>
    where
        C: 'static,
        K: 'static,
        A: 'static,
        F: Fn(&mut C, &mut EventArgs<K, A>) -> Result<(), HandlerError> + 'static,
    {
        if self.sealed {
            return Err(EventError::Sealed);
        }
        if self.get(event.id()).is_none() {
            return Err(EventError::Unregistered(event.id()));
        }
        let handler: Handler<C, K, A> = alloc::rc::Rc::new(handler);
        self.class_handlers
            .entry((event.id(), target_type))
            .or_default()
            .push(Box::new(handler));
        Ok(())
    }

    /// Adds a type-level handler.
    ///
    /// # Panics
    ///
    /// Panics on any [`EventError`].
    pub fn add_class_handler<C, K, A, F>(&mut self, event: RoutedEvent<A>, target_type: TypeTag, handler: F)
    where
        C: 'static,
        K: 'static,
        A: 'static,
        F: Fn(&mut C, &mut EventArgs<K, A>) -> Result<(), HandlerError> + 'static,
    {
        if let Err(e) = self.try_add_class_handler(event, target_type, handler) {
            panic!("{e}");
        }
    }

    /// Resolves the class handler for an element with `chain`.
    ///
    /// Walks the chain from most-derived to base. The first type with a
    /// handler for `event` of the requested context type wins, and of its
    /// handlers the first registered is returned. Handlers of less-derived
    /// types are not chained.
    #[must_use]
    pub fn class_handler<C, K, A>(&self, event: RoutedEvent<A>, chain: &TypeChain) -> Option<Handler<C, K, A>>
    where
        C: 'static,
        K: 'static,
        A: 'static,
    {
        chain.iter().find_map(|tag| {
            let first = self.class_handlers.get(&(event.id(), tag))?.first()?;
            let typed = (**first).downcast_ref::<Handler<C, K, A>>();
            if typed.is_none() {
                log::warn!("class handler for {} has a different context type", event.id());
            }
            typed.cloned()
        })
    }

    /// Forbids further registration.
    pub fn seal(&mut self) {
        log::debug!("event registry sealed with {} definitions", self.events.len());
        self.sealed = true;
    }

    /// Returns `true` once sealed.
    #[must_use]
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered events.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the definition for `id`.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&EventDefinition> {
        self.events.get(id.index() as usize)
    }

    /// Resolves `name` for an element with `chain`, most-derived owner first.
    #[must_use]
    pub fn find(&self, name: &str, chain: &TypeChain) -> Option<EventId> {
        let candidates = self.by_name.get(name)?;
        chain.iter().find_map(|tag| {
            candidates
                .iter()
                .copied()
                .find(|id| self.events[id.index() as usize].owner == tag)
        })
    }

    /// Every definition available on `owner`: those declared on `owner` or any
    /// of its base types, in registration order, each listed once.
    pub fn event_definitions<'a>(
        &'a self,
        types: &'a TypeRegistry,
        owner: TypeTag,
    ) -> impl Iterator<Item = (EventId, &'a EventDefinition)> + 'a {
        self.iter()
            .filter(move |(_, def)| types.is_assignable(owner, def.owner))
    }

    /// Iterates over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (EventId, &EventDefinition)> {
        self.events.iter().enumerate().map(|(i, def)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len <= u16::MAX")]
            let index = i as u16;
            (EventId::new(index), def)
        })
    }
}

impl core::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("events", &self.events.iter().map(|e| e.name).collect::<Vec<_>>())
            .field("class_handlers", &self.class_handlers.len())
            .field("sealed", &self.sealed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type Log = Vec<&'static str>;

    struct Fixture {
        types: TypeRegistry,
        element: TypeTag,
        control: TypeTag,
        button: TypeTag,
        panel: TypeTag,
    }

    fn fixture() -> Fixture {
        let mut types = TypeRegistry::new();
        let element = types.register("UxmlElement", None);
        let control = types.register("Control", Some(element));
        let button = types.register("Button", Some(control));
        let panel = types.register("Panel", Some(element));
        Fixture {
            types,
            element,
            control,
            button,
            panel,
        }
    }

    #[test]
    fn duplicate_name_on_same_owner_rejected() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        events.register::<()>("Click", fx.control, RoutingStrategy::Direct);
        assert_eq!(
            events
                .try_register::<()>("Click", fx.control, RoutingStrategy::Bubble)
                .unwrap_err(),
            EventError::Duplicate {
                name: "Click",
                owner: fx.control
            }
        );
        // Another owner may reuse the name.
        assert!(
            events
                .try_register::<()>("Click", fx.panel, RoutingStrategy::Direct)
                .is_ok()
        );
    }

    #[test]
    fn most_derived_class_handler_wins() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        let click = events.register::<()>("Click", fx.element, RoutingStrategy::Direct);
        events.add_class_handler(click, fx.element, |log: &mut Log, _: &mut EventArgs<u32, ()>| {
            log.push("element");
            Ok(())
        });
        events.add_class_handler(click, fx.control, |log: &mut Log, _: &mut EventArgs<u32, ()>| {
            log.push("control-1");
            Ok(())
        });
        events.add_class_handler(click, fx.control, |log: &mut Log, _: &mut EventArgs<u32, ()>| {
            log.push("control-2");
            Ok(())
        });

        let mut log = Log::new();
        let mut args = EventArgs::new(click, 0, ());
        let h = events
            .class_handler::<Log, u32, ()>(click, &fx.types.chain(fx.button))
            .unwrap();
        h(&mut log, &mut args).unwrap();
        let h = events
            .class_handler::<Log, u32, ()>(click, &fx.types.chain(fx.panel))
            .unwrap();
        h(&mut log, &mut args).unwrap();
        assert_eq!(log, vec!["control-1", "element"]);
    }

    #[test]
    fn mistyped_derived_handler_falls_back_to_base() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        let click = events.register::<()>("Click", fx.element, RoutingStrategy::Direct);
        events.add_class_handler(click, fx.element, |log: &mut Log, _: &mut EventArgs<u32, ()>| {
            log.push("element");
            Ok(())
        });
        // Registered for another context type.
        events.add_class_handler(click, fx.control, |_: &mut u8, _: &mut EventArgs<u32, ()>| Ok(()));

        let mut log = Log::new();
        let mut args = EventArgs::new(click, 0, ());
        let h = events
            .class_handler::<Log, u32, ()>(click, &fx.types.chain(fx.button))
            .unwrap();
        h(&mut log, &mut args).unwrap();
        assert_eq!(log, vec!["element"]);
    }

    #[test]
    fn no_class_handler_on_unrelated_chain() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        let click = events.register::<()>("Click", fx.element, RoutingStrategy::Direct);
        events.add_class_handler(click, fx.control, |_: &mut Log, _: &mut EventArgs<u32, ()>| Ok(()));
        assert!(
            events
                .class_handler::<Log, u32, ()>(click, &fx.types.chain(fx.panel))
                .is_none()
        );
    }

    #[test]
    fn definitions_include_base_types_once() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        let down = events.register::<()>("MouseDown", fx.element, RoutingStrategy::Bubble);
        let click = events.register::<()>("Click", fx.control, RoutingStrategy::Direct);
        let scroll = events.register::<()>("Scroll", fx.panel, RoutingStrategy::Bubble);

        let ids: Vec<_> = events
            .event_definitions(&fx.types, fx.button)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![down.id(), click.id()]);
        let ids: Vec<_> = events
            .event_definitions(&fx.types, fx.panel)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![down.id(), scroll.id()]);
    }

    #[test]
    fn find_prefers_most_derived_owner() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        let base = events.register::<()>("Activate", fx.element, RoutingStrategy::Direct);
        let derived = events.register::<()>("Activate", fx.control, RoutingStrategy::Bubble);
        assert_eq!(events.find("Activate", &fx.types.chain(fx.button)), Some(derived.id()));
        assert_eq!(events.find("Activate", &fx.types.chain(fx.panel)), Some(base.id()));
        assert_eq!(events.get(derived.id()).map(EventDefinition::routing), Some(RoutingStrategy::Bubble));
    }

    #[test]
    fn sealed_rejects_registration_and_handlers() {
        let fx = fixture();
        let mut events = EventRegistry::new();
        let click = events.register::<()>("Click", fx.element, RoutingStrategy::Direct);
        events.seal();
        assert_eq!(
            events
                .try_register::<()>("Late", fx.element, RoutingStrategy::Direct)
                .unwrap_err(),
            EventError::Sealed
        );
        assert_eq!(
            events.try_add_class_handler(click, fx.element, |_: &mut Log, _: &mut EventArgs<u32, ()>| Ok(())),
            Err(EventError::Sealed)
        );
    }
}
