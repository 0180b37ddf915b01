// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element arena.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

use uxml_event::{
    DispatchReport, EventArgs, Handler, RoutedEvent, build_route, dispatcher, invoke_all,
};
use uxml_property::{
    Property, PropertyChange, PropertyFlags, PropertyObjectExt, PropertyValue,
};
use uxml_types::{TypeChain, TypeTag};
use uxml_update::{UpdateKind, UpdateQueue};

use crate::element::Element;
use crate::error::ElementError;
use crate::id::ElementId;
use crate::registries::{PropertyChangedArgs, Registries};

/// A handler whose context is the element tree.
pub type ElementHandler<A> = Handler<ElementTree, ElementId, A>;

/// Event arguments routed through an element tree.
pub type ElementArgs<A> = EventArgs<ElementId, A>;

/// Result of [`ElementTree::raise`].
#[derive(Debug)]
pub struct Raised<A> {
    /// The arguments after routing, including `handled` and the payload.
    pub args: ElementArgs<A>,
    /// Handler counts.
    pub report: DispatchReport,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena of elements sharing one set of sealed [`Registries`].
///
/// Each element has at most one parent. A control may additionally own a
/// chrome subtree whose root's parent is the control; chrome is searched by
/// [`find_name`](Self::find_name) and visited by bubbling events, but is not
/// listed among the control's [`children`](Self::children).
///
/// Property writes that change the effective value raise `PropertyChanged`
/// on the element and queue layout or render work according to the
/// property's flags.
///
/// ```rust
/// use std::rc::Rc;
/// use uxml_element::{ElementTree, Registries};
/// use uxml_property::{PropertyFlags, PropertyMetadataBuilder};
/// use uxml_update::UpdateKind;
///
/// let mut registries = Registries::new("UxmlElement");
/// let root = registries.root_type();
/// let width = registries.properties.register(
///     &registries.types,
///     "Width",
///     root,
///     PropertyMetadataBuilder::new(0.0_f64).flags(PropertyFlags::AFFECTS_LAYOUT).build(),
/// );
/// registries.seal();
///
/// let mut tree = ElementTree::new(Rc::new(registries));
/// let panel = tree.create(root);
/// let child = tree.create_named(root, "child");
/// tree.add_child(panel, child).unwrap();
///
/// assert!(tree.set(child, width, 40.0).unwrap());
/// assert_eq!(tree.get(child, width).unwrap(), 40.0);
/// assert_eq!(tree.find_name(panel, "child"), Some(child));
/// assert!(tree.updates().is_pending(UpdateKind::LAYOUT, child));
/// ```
#[derive(Debug)]
pub struct ElementTree {
    registries: Rc<Registries>,
    slots: Vec<Slot>,
    free: Vec<u32>,
    updates: UpdateQueue<ElementId>,
    live: usize,
}

impl ElementTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new(registries: Rc<Registries>) -> Self {
        if !registries.is_sealed() {
            log::warn!("element tree created over unsealed registries");
        }
        Self {
            registries,
            slots: Vec::new(),
            free: Vec::new(),
            updates: UpdateQueue::new(),
            live: 0,
        }
    }

    /// The shared registries.
    #[must_use]
    #[inline]
    pub fn registries(&self) -> &Rc<Registries> {
        &self.registries
    }

    /// Number of live elements.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the tree holds no elements.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // --- structure ---

    /// Creates a detached element of type `ty`.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is not registered.
    pub fn create(&mut self, ty: TypeTag) -> ElementId {
        self.insert(ty, None)
    }

    /// Creates a detached element of type `ty` with a name.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is not registered.
    pub fn create_named(&mut self, ty: TypeTag, name: impl Into<String>) -> ElementId {
        self.insert(ty, Some(name.into()))
    }

    fn insert(&mut self, ty: TypeTag, name: Option<String>) -> ElementId {
        let chain = self.registries.types.chain(ty);
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            ElementId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or_else(|_| panic!("element arena full"));
            self.slots.push(Slot {
                generation: 1,
                element: None,
            });
            ElementId::new(idx, 1)
        };
        self.slots[id.idx()].element = Some(Element::new(id, chain, name));
        self.live += 1;
        id
    }

    /// Returns `true` if `id` refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Borrows a live element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.element.as_ref())
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, ElementError> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.element.as_mut())
            .ok_or(ElementError::Stale(id))
    }

    fn live(&self, id: ElementId) -> Result<&Element, ElementError> {
        self.element(id).ok_or(ElementError::Stale(id))
    }

    /// Parent of `id` (the control, for a chrome root).
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(Element::parent)
    }

    /// Content children of `id`; empty for stale handles.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(Element::children).unwrap_or_default()
    }

    /// Chrome root of `id`.
    #[must_use]
    pub fn chrome(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(Element::chrome)
    }

    /// Type chain of `id`.
    #[must_use]
    pub fn type_chain(&self, id: ElementId) -> Option<&TypeChain> {
        self.element(id).map(|e| &e.chain)
    }

    /// Name of `id`.
    #[must_use]
    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(Element::name)
    }

    /// `id` followed by its ancestors up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        core::iter::successors(self.is_alive(id).then_some(id), |&k| self.parent(k))
    }

    fn check_no_cycle(&self, parent: ElementId, child: ElementId) -> Result<(), ElementError> {
        if self.ancestors(parent).any(|a| a == child) {
            return Err(ElementError::Cycle { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, child: ElementId) {
        let Some(old) = self.parent(child) else {
            return;
        };
        if let Ok(p) = self.element_mut(old) {
            if p.chrome == Some(child) {
                p.chrome = None;
            } else {
                p.children.retain(|c| *c != child);
            }
        }
        if let Ok(c) = self.element_mut(child) {
            c.parent = None;
        }
        self.updates.do_later(UpdateKind::LAYOUT, old);
    }

    /// Appends `child` to the content of `parent`, detaching it from any
    /// previous parent first.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), ElementError> {
        self.live(parent)?;
        self.live(child)?;
        self.check_no_cycle(parent, child)?;
        self.detach(child);
        self.element_mut(child)?.parent = Some(parent);
        self.element_mut(parent)?.children.push(child);
        self.updates.do_later(UpdateKind::LAYOUT, parent);
        Ok(())
    }

    /// Detaches `child` from its parent, keeping it alive.
    ///
    /// Returns the former parent.
    pub fn detach_child(&mut self, child: ElementId) -> Result<Option<ElementId>, ElementError> {
        self.live(child)?;
        let old = self.parent(child);
        self.detach(child);
        Ok(old)
    }

    /// Replaces the chrome subtree of `control`.
    ///
    /// Returns the previous chrome root, now detached but still alive.
    pub fn set_chrome(
        &mut self,
        control: ElementId,
        root: Option<ElementId>,
    ) -> Result<Option<ElementId>, ElementError> {
        self.live(control)?;
        if let Some(root) = root {
            self.live(root)?;
            self.check_no_cycle(control, root)?;
        }
        let old = self.chrome(control);
        if old == root {
            return Ok(old);
        }
        if let Some(old) = old {
            self.detach(old);
        }
        if let Some(root) = root {
            self.detach(root);
            self.element_mut(root)?.parent = Some(control);
            self.element_mut(control)?.chrome = Some(root);
        }
        self.updates.do_later(UpdateKind::LAYOUT, control);
        self.updates.do_later(UpdateKind::RENDER, control);
        Ok(old)
    }

    /// Removes `id` together with its content and chrome subtrees.
    ///
    /// Returns the number of elements removed.
    pub fn remove(&mut self, id: ElementId) -> Result<usize, ElementError> {
        self.live(id)?;
        self.detach(id);
        let mut stack: SmallVec<[ElementId; 16]> = SmallVec::new();
        stack.push(id);
        let mut removed = 0;
        while let Some(k) = stack.pop() {
            let slot = &mut self.slots[k.idx()];
            if slot.generation != k.generation() {
                continue;
            }
            let Some(element) = slot.element.take() else {
                continue;
            };
            stack.extend(element.chrome);
            stack.extend(element.children.iter().copied());
            #[expect(clippy::cast_possible_truncation, reason = "slot index came from a u32")]
            let idx = k.idx() as u32;
            self.free.push(idx);
            self.updates.cancel_source(k);
            removed += 1;
        }
        self.live -= removed;
        log::debug!("removed {removed} elements rooted at {id:?}");
        Ok(removed)
    }

    /// Finds the first element named `name` in `scope`'s subtree.
    ///
    /// Depth-first: `scope` itself, then its chrome subtree, then its content
    /// children in order.
    #[must_use]
    pub fn find_name(&self, scope: ElementId, name: &str) -> Option<ElementId> {
        let mut stack: SmallVec<[ElementId; 16]> = SmallVec::new();
        stack.push(scope);
        while let Some(k) = stack.pop() {
            let Some(e) = self.element(k) else {
                continue;
            };
            if e.name.as_deref() == Some(name) {
                return Some(k);
            }
            stack.extend(e.children.iter().rev().copied());
            stack.extend(e.chrome);
        }
        None
    }

    // --- properties ---

    /// Effective value of `property` on `id`: local value or default.
    pub fn get<T: PropertyValue>(&self, id: ElementId, property: Property<T>) -> Result<T, ElementError> {
        Ok(self.live(id)?.get_value(property, &self.registries.properties))
    }

    /// Effective value with inheritance along the parent chain.
    pub fn get_inherited<T: PropertyValue>(
        &self,
        id: ElementId,
        property: Property<T>,
    ) -> Result<T, ElementError> {
        let element = self.live(id)?;
        let lookup = |k: ElementId| self.element(k).map(|e| (&e.store, e.parent));
        Ok(element.get_inherited(property, &self.registries.properties, &lookup))
    }

    /// The explicitly set value of `property` on `id`, if any.
    #[must_use]
    pub fn get_local<T: PropertyValue>(&self, id: ElementId, property: Property<T>) -> Option<T> {
        self.element(id)?.get_local_value(property).cloned()
    }

    /// Writes `property` on `id`.
    ///
    /// Returns `true` if the effective value changed, in which case
    /// `PropertyChanged` was raised and updates were queued.
    pub fn set<T: PropertyValue>(
        &mut self,
        id: ElementId,
        property: Property<T>,
        value: T,
    ) -> Result<bool, ElementError> {
        let registries = Rc::clone(&self.registries);
        let change = self
            .element_mut(id)?
            .set_value(property, value, &registries.properties)?;
        self.after_change(id, change)
    }

    /// Removes the local value of `property` on `id`.
    ///
    /// Returns `true` if the effective value changed.
    pub fn clear<T: PropertyValue>(&mut self, id: ElementId, property: Property<T>) -> Result<bool, ElementError> {
        let registries = Rc::clone(&self.registries);
        let change = self
            .element_mut(id)?
            .clear_value(property, &registries.properties)?;
        self.after_change(id, change)
    }

    fn after_change(&mut self, id: ElementId, change: Option<PropertyChange>) -> Result<bool, ElementError> {
        let Some(change) = change else {
            return Ok(false);
        };
        let flags = self.registries.properties.flags(change.property());
        let event = self.registries.property_changed();
        self.raise(event, id, PropertyChangedArgs { change })?;
        if flags.contains(PropertyFlags::AFFECTS_LAYOUT) {
            self.updates.do_later(UpdateKind::LAYOUT, id);
        }
        if flags.contains(PropertyFlags::AFFECTS_RENDER) {
            self.updates.do_later(UpdateKind::RENDER, id);
        }
        Ok(true)
    }

    // --- events ---

    /// Adds an instance listener. Returns `false` if it was already present.
    pub fn add_handler<A: 'static>(
        &mut self,
        id: ElementId,
        event: RoutedEvent<A>,
        handler: ElementHandler<A>,
    ) -> Result<bool, ElementError> {
        Ok(self.element_mut(id)?.notifier.add(event, handler))
    }

    /// Removes an instance listener. Returns `true` if it was present.
    pub fn remove_handler<A: 'static>(
        &mut self,
        id: ElementId,
        event: RoutedEvent<A>,
        handler: &ElementHandler<A>,
    ) -> Result<bool, ElementError> {
        Ok(self.element_mut(id)?.notifier.remove(event, handler))
    }

    /// Raises `event` on `source` and routes it per its strategy.
    ///
    /// At each element the class handler resolved from its type chain runs
    /// first, then its instance listeners. Routing stops before the next
    /// element once a handler sets `handled`. Elements removed by a handler
    /// mid-route are skipped.
    pub fn raise<A: 'static>(
        &mut self,
        event: RoutedEvent<A>,
        source: ElementId,
        payload: A,
    ) -> Result<Raised<A>, ElementError> {
        self.live(source)?;
        let mut args = EventArgs::new(event, source, payload);
        let report = self.dispatch(event, &mut args);
        Ok(Raised { args, report })
    }

    /// Routes prepared `args` from `args.source`.
    pub fn dispatch<A: 'static>(&mut self, event: RoutedEvent<A>, args: &mut ElementArgs<A>) -> DispatchReport {
        let registries = Rc::clone(&self.registries);
        let route = build_route(event.routing(), args.source, |k| self.parent(k));
        log::debug!(
            "routing {:?} event {} over {} elements",
            event.routing(),
            event.id(),
            route.len()
        );
        dispatcher::run(&route, args, |k, args| {
            let Some(element) = self.element(k) else {
                return DispatchReport::default();
            };
            let class = registries
                .events
                .class_handler::<Self, ElementId, A>(event, &element.chain);
            let listeners = element.notifier.listeners(event);
            let mut report = DispatchReport::default();
            if let Some(class) = class {
                report += invoke_all(&[class], &mut *self, args);
            }
            report += invoke_all(&listeners, &mut *self, args);
            report
        })
    }

    // --- updates ---

    /// Pending deferred work.
    #[must_use]
    #[inline]
    pub fn updates(&self) -> &UpdateQueue<ElementId> {
        &self.updates
    }

    /// Pending deferred work, mutably.
    #[inline]
    pub fn updates_mut(&mut self) -> &mut UpdateQueue<ElementId> {
        &mut self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::RefCell;
    use uxml_event::{RoutingStrategy, handler};
    use uxml_property::{PropertyError, PropertyMetadataBuilder};

    struct Fixture {
        tree: ElementTree,
        element: TypeTag,
        panel: TypeTag,
        width: Property<f64>,
        fill: Property<u32>,
        orientation: Property<u8>,
        down: RoutedEvent<()>,
    }

    fn fixture() -> Fixture {
        let mut r = Registries::new("UxmlElement");
        let element = r.root_type();
        let panel = r.types.register("Panel", Some(element));
        let width = r.properties.register(
            &r.types,
            "Width",
            element,
            PropertyMetadataBuilder::new(0.0).flags(PropertyFlags::AFFECTS_LAYOUT).build(),
        );
        let fill = r.properties.register(
            &r.types,
            "Fill",
            element,
            PropertyMetadataBuilder::new(0).flags(PropertyFlags::AFFECTS_RENDER).build(),
        );
        let orientation =
            r.properties
                .register(&r.types, "Orientation", panel, PropertyMetadataBuilder::new(0).build());
        let down = r.events.register("MouseDown", element, RoutingStrategy::Bubble);
        r.seal();
        Fixture {
            tree: ElementTree::new(Rc::new(r)),
            element,
            panel,
            width,
            fill,
            orientation,
            down,
        }
    }

    #[test]
    fn stale_handles_do_not_alias() {
        let mut fx = fixture();
        let a = fx.tree.create(fx.element);
        assert_eq!(fx.tree.remove(a), Ok(1));
        let b = fx.tree.create(fx.element);
        assert_ne!(a, b);
        assert!(!fx.tree.is_alive(a));
        assert!(fx.tree.is_alive(b));
        assert_eq!(fx.tree.get(a, fx.width), Err(ElementError::Stale(a)));
        assert_eq!(fx.tree.len(), 1);
    }

    #[test]
    fn add_child_reparents_and_rejects_cycles() {
        let mut fx = fixture();
        let a = fx.tree.create(fx.panel);
        let b = fx.tree.create(fx.panel);
        let c = fx.tree.create(fx.element);
        fx.tree.add_child(a, b).unwrap();
        fx.tree.add_child(b, c).unwrap();
        assert_eq!(
            fx.tree.add_child(c, a),
            Err(ElementError::Cycle { parent: c, child: a })
        );
        assert_eq!(fx.tree.add_child(a, a), Err(ElementError::Cycle { parent: a, child: a }));
        fx.tree.add_child(a, c).unwrap();
        assert_eq!(fx.tree.children(a), &[b, c]);
        assert!(fx.tree.children(b).is_empty());
        assert_eq!(fx.tree.parent(c), Some(a));

        assert_eq!(fx.tree.detach_child(c), Ok(Some(a)));
        assert_eq!(fx.tree.children(a), &[b]);
        assert!(fx.tree.is_alive(c));
        assert_eq!(fx.tree.detach_child(c), Ok(None));
    }

    #[test]
    fn remove_takes_subtree_and_chrome() {
        let mut fx = fixture();
        let root = fx.tree.create(fx.panel);
        let control = fx.tree.create(fx.element);
        let chrome = fx.tree.create(fx.panel);
        let part = fx.tree.create(fx.element);
        fx.tree.add_child(root, control).unwrap();
        fx.tree.add_child(chrome, part).unwrap();
        fx.tree.set_chrome(control, Some(chrome)).unwrap();
        fx.tree.set(part, fx.width, 3.0).unwrap();
        assert_eq!(fx.tree.remove(control), Ok(3));
        assert!(!fx.tree.is_alive(part));
        assert!(fx.tree.children(root).is_empty());
        assert!(!fx.tree.updates().is_pending(UpdateKind::LAYOUT, part));
    }

    #[test]
    fn chrome_is_searched_before_content() {
        let mut fx = fixture();
        let control = fx.tree.create(fx.panel);
        let chrome = fx.tree.create(fx.panel);
        let in_chrome = fx.tree.create_named(fx.element, "part");
        let in_content = fx.tree.create_named(fx.element, "part");
        fx.tree.add_child(chrome, in_chrome).unwrap();
        fx.tree.add_child(control, in_content).unwrap();
        fx.tree.set_chrome(control, Some(chrome)).unwrap();
        assert_eq!(fx.tree.find_name(control, "part"), Some(in_chrome));
        assert_eq!(fx.tree.parent(chrome), Some(control));
        assert_eq!(fx.tree.children(control), &[in_content]);

        // Swapping chrome returns the old root detached.
        let other = fx.tree.create(fx.panel);
        assert_eq!(fx.tree.set_chrome(control, Some(other)), Ok(Some(chrome)));
        assert_eq!(fx.tree.parent(chrome), None);
        assert_eq!(fx.tree.find_name(control, "part"), Some(in_content));
    }

    #[test]
    fn set_schedules_updates_by_flags() {
        let mut fx = fixture();
        let e = fx.tree.create(fx.element);
        let _ = fx.tree.updates_mut().drain();
        assert!(fx.tree.set(e, fx.width, 5.0).unwrap());
        assert!(fx.tree.set(e, fx.fill, 7).unwrap());
        let work: Vec<_> = fx.tree.updates_mut().drain().collect();
        assert_eq!(work, vec![(UpdateKind::LAYOUT, e), (UpdateKind::RENDER, e)]);
    }

    #[test]
    fn equal_write_raises_nothing() {
        let mut fx = fixture();
        let e = fx.tree.create(fx.element);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = Rc::clone(&seen);
        let changed = fx.tree.registries().property_changed();
        fx.tree
            .add_handler(
                e,
                changed,
                handler(move |_: &mut ElementTree, args: &mut ElementArgs<PropertyChangedArgs>| {
                    seen_in.borrow_mut().push(args.payload.change.property());
                    Ok(())
                }),
            )
            .unwrap();
        assert!(!fx.tree.set(e, fx.width, 0.0).unwrap());
        assert!(seen.borrow().is_empty());
        assert!(fx.tree.set(e, fx.width, 1.0).unwrap());
        assert!(!fx.tree.set(e, fx.width, 1.0).unwrap());
        assert!(fx.tree.clear(e, fx.width).unwrap());
        assert_eq!(*seen.borrow(), vec![fx.width.id(), fx.width.id()]);
    }

    #[test]
    fn clear_matches_fresh_element() {
        let mut fx = fixture();
        let e = fx.tree.create(fx.element);
        let fresh = fx.tree.create(fx.element);
        fx.tree.set(e, fx.width, 9.0).unwrap();
        fx.tree.clear(e, fx.width).unwrap();
        assert_eq!(fx.tree.get(e, fx.width), fx.tree.get(fresh, fx.width));
    }

    #[test]
    fn non_applicable_write_is_rejected() {
        let mut fx = fixture();
        let e = fx.tree.create(fx.element);
        assert!(matches!(
            fx.tree.set(e, fx.orientation, 1),
            Err(ElementError::Property(PropertyError::NotApplicable { .. }))
        ));
        assert_eq!(fx.tree.get(e, fx.orientation), Ok(0));
    }

    #[test]
    fn bubble_stops_after_handled() {
        let mut fx = fixture();
        let a = fx.tree.create_named(fx.panel, "A");
        let b = fx.tree.create_named(fx.panel, "B");
        let c = fx.tree.create_named(fx.element, "C");
        fx.tree.add_child(a, b).unwrap();
        fx.tree.add_child(b, c).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        for (id, stop) in [(a, false), (b, true), (c, false)] {
            let log = Rc::clone(&log);
            fx.tree
                .add_handler(
                    id,
                    fx.down,
                    handler(move |tree: &mut ElementTree, args: &mut ElementArgs<()>| {
                        let name: String = tree.name(args.current).unwrap_or_default().into();
                        log.borrow_mut().push(name);
                        args.handled = stop;
                        Ok(())
                    }),
                )
                .unwrap();
        }
        let raised = fx.tree.raise(fx.down, c, ()).unwrap();
        assert!(raised.args.handled);
        assert_eq!(raised.report.invoked, 2);
        assert_eq!(*log.borrow(), vec![String::from("C"), String::from("B")]);
    }

    #[test]
    fn handlers_may_mutate_the_tree() {
        let mut fx = fixture();
        let parent = fx.tree.create(fx.panel);
        let child = fx.tree.create(fx.element);
        fx.tree.add_child(parent, child).unwrap();
        let width = fx.width;
        fx.tree
            .add_handler(
                parent,
                fx.down,
                handler(move |tree: &mut ElementTree, args: &mut ElementArgs<()>| {
                    tree.set(args.source, width, 11.0)
                        .map(|_| ())
                        .map_err(|e| uxml_event::HandlerError::new(alloc::format!("{e}")))
                }),
            )
            .unwrap();
        fx.tree.raise(fx.down, child, ()).unwrap();
        assert_eq!(fx.tree.get(child, fx.width), Ok(11.0));
    }
}
