// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effects: actions bound to a property condition.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use uxml_element::{ElementError, ElementId, ElementTree};
use uxml_property::{Property, PropertyChange, PropertyId, PropertyValue};

use crate::action::AnyAction;
use crate::scope::resolve;

/// The condition an [`Effect`] watches: `property` on the source equals `value`.
///
/// The source is the control itself, or the part named `source` inside it.
#[derive(Clone, Debug)]
pub struct Trigger<T: PropertyValue> {
    property: Property<T>,
    source: Option<String>,
    value: T,
}

impl<T: PropertyValue> Trigger<T> {
    /// Fires while the control's `property` equals `value`.
    #[must_use]
    pub fn new(property: Property<T>, value: T) -> Self {
        Self {
            property,
            source: None,
            value,
        }
    }

    /// Watches the part named `name` instead of the control.
    #[must_use]
    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source = Some(name.into());
        self
    }
}

/// Object-safe view of a [`Trigger`].
pub trait Condition {
    /// The watched property.
    fn property_id(&self) -> PropertyId;

    /// The element whose property is watched, if it exists.
    fn source(&self, tree: &ElementTree, control: ElementId) -> Option<ElementId>;

    /// Returns `true` while the condition holds for `control`.
    fn holds(&self, tree: &ElementTree, control: ElementId) -> bool;
}

impl<T: PropertyValue> Condition for Trigger<T> {
    fn property_id(&self) -> PropertyId {
        self.property.id()
    }

    fn source(&self, tree: &ElementTree, control: ElementId) -> Option<ElementId> {
        resolve(tree, control, self.source.as_deref())
    }

    fn holds(&self, tree: &ElementTree, control: ElementId) -> bool {
        self.source(tree, control)
            .and_then(|src| tree.get(src, self.property).ok())
            .is_some_and(|v| v == self.value)
    }
}

/// A set of actions applied while a [`Trigger`] holds.
///
/// Actions start in insertion order when the trigger starts to hold and
/// reverse in the opposite order when it stops holding, so overlapping
/// actions unwind cleanly. One effect may serve many controls; its applied
/// state is tracked per control.
///
/// ```rust
/// use std::rc::Rc;
/// use uxml_effect::{Action, Effect, Trigger};
/// use uxml_element::{ElementTree, Registries};
/// use uxml_property::PropertyMetadata;
///
/// let mut r = Registries::new("UxmlElement");
/// let root = r.root_type();
/// let pressed = r.properties.register(&r.types, "IsPressed", root, PropertyMetadata::new(false));
/// let opacity = r.properties.register(&r.types, "Opacity", root, PropertyMetadata::new(1.0_f64));
/// r.seal();
/// let mut tree = ElementTree::new(Rc::new(r));
/// let button = tree.create(root);
///
/// let mut effect = Effect::new(Trigger::new(pressed, true))
///     .with_action(Action::property(opacity, 0.6));
///
/// tree.set(button, pressed, true).unwrap();
/// assert!(effect.evaluate(&mut tree, button).unwrap());
/// assert_eq!(tree.get(button, opacity).unwrap(), 0.6);
///
/// tree.set(button, pressed, false).unwrap();
/// assert!(effect.evaluate(&mut tree, button).unwrap());
/// assert_eq!(tree.get(button, opacity).unwrap(), 1.0);
/// ```
pub struct Effect {
    trigger: Box<dyn Condition>,
    actions: Vec<Box<dyn AnyAction>>,
    applied: HashSet<ElementId>,
}

impl Effect {
    /// An effect with no actions yet.
    #[must_use]
    pub fn new<T: PropertyValue>(trigger: Trigger<T>) -> Self {
        Self {
            trigger: Box::new(trigger),
            actions: Vec::new(),
            applied: HashSet::new(),
        }
    }

    /// Appends an action.
    #[must_use]
    pub fn with_action(mut self, action: impl AnyAction + 'static) -> Self {
        self.push(action);
        self
    }

    /// Appends an action.
    pub fn push(&mut self, action: impl AnyAction + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the effect has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The actions in start order.
    pub fn actions(&self) -> impl Iterator<Item = &dyn AnyAction> {
        self.actions.iter().map(|a| &**a)
    }

    /// Returns `true` if the effect is currently applied to `control`.
    #[must_use]
    pub fn is_applied(&self, control: ElementId) -> bool {
        self.applied.contains(&control)
    }

    /// The element whose property the trigger watches for `control`.
    #[must_use]
    pub fn source(&self, tree: &ElementTree, control: ElementId) -> Option<ElementId> {
        self.trigger.source(tree, control)
    }

    /// Brings `control` in line with the trigger.
    ///
    /// Returns `true` if the effect was applied or unapplied.
    pub fn evaluate(&mut self, tree: &mut ElementTree, control: ElementId) -> Result<bool, ElementError> {
        let holds = self.trigger.holds(tree, control);
        let applied = self.applied.contains(&control);
        if holds && !applied {
            for i in 0..self.actions.len() {
                if let Err(e) = self.actions[i].start(tree, control) {
                    self.roll_back(tree, control, i);
                    return Err(e);
                }
            }
            self.applied.insert(control);
            Ok(true)
        } else if !holds && applied {
            for action in self.actions.iter_mut().rev() {
                action.reverse(tree, control)?;
            }
            self.applied.remove(&control);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Reverses the first `started` actions, last first.
    fn roll_back(&mut self, tree: &mut ElementTree, control: ElementId, started: usize) {
        for action in self.actions[..started].iter_mut().rev() {
            if let Err(e) = action.reverse(tree, control) {
                log::warn!("effect rollback on {control:?} failed: {e}");
            }
        }
    }

    /// Re-evaluates when `change` on `source` concerns the trigger.
    ///
    /// Changes to other properties or other elements are ignored.
    pub fn on_property_changed(
        &mut self,
        tree: &mut ElementTree,
        control: ElementId,
        source: ElementId,
        change: &PropertyChange,
    ) -> Result<bool, ElementError> {
        if change.property() != self.trigger.property_id()
            || self.trigger.source(tree, control) != Some(source)
        {
            return Ok(false);
        }
        self.evaluate(tree, control)
    }

    /// Forgets every per-control record, without reversing anything.
    pub fn clear_data(&mut self) {
        self.applied.clear();
        for action in &mut self.actions {
            action.clear_data();
        }
    }
}

impl core::fmt::Debug for Effect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Effect")
            .field("trigger", &self.trigger.property_id())
            .field("actions", &self.actions.len())
            .field("applied", &self.applied)
            .finish()
    }
}
