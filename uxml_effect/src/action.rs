// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reversible property actions.

use alloc::string::String;
use core::time::Duration;
use hashbrown::HashMap;
use uxml_element::{ElementError, ElementId, ElementTree};
use uxml_property::{Property, PropertyId, PropertyValue};

use crate::scope::resolve;

/// Flavour of an [`Action`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Apply the value immediately.
    Property,
    /// Apply the value with timing metadata. The value is still applied
    /// immediately; `duration` and `delay` are carried for hosts that animate.
    Animate {
        /// Length of the transition.
        duration: Duration,
        /// Wait before the transition begins.
        delay: Duration,
    },
}

/// Execution state of an action for one control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ActionState {
    /// Not applied.
    #[default]
    Idle,
    /// Applied; `reverse` will restore the captured value.
    Active,
}

/// The per-control execution record of an [`Action`].
#[derive(Clone, Debug)]
pub struct ActionData<T> {
    target: ElementId,
    start: Option<T>,
    state: ActionState,
}

impl<T> ActionData<T> {
    /// The element the action wrote to.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// The local value captured on start, if the target had one.
    #[must_use]
    pub fn start_value(&self) -> Option<&T> {
        self.start.as_ref()
    }

    /// Returns `true` when the target had no local value on start; reversing
    /// then clears the property instead of writing a default back.
    #[must_use]
    pub fn undefined_start(&self) -> bool {
        self.start.is_none()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ActionState {
        self.state
    }
}

/// Sets one property on a control (or a named part of it) and can undo that.
///
/// `start` and `reverse` are idempotent: starting an active action or
/// reversing an idle one does nothing.
///
/// ```rust
/// use std::rc::Rc;
/// use uxml_effect::{Action, ActionState, AnyAction};
/// use uxml_element::{ElementTree, Registries};
/// use uxml_property::PropertyMetadata;
///
/// let mut r = Registries::new("UxmlElement");
/// let root = r.root_type();
/// let opacity = r.properties.register(&r.types, "Opacity", root, PropertyMetadata::new(1.0_f64));
/// r.seal();
/// let mut tree = ElementTree::new(Rc::new(r));
/// let control = tree.create(root);
///
/// let mut fade = Action::property(opacity, 0.5);
/// assert!(fade.start(&mut tree, control).unwrap());
/// assert!(!fade.start(&mut tree, control).unwrap());
/// assert_eq!(tree.get(control, opacity).unwrap(), 0.5);
///
/// assert!(fade.reverse(&mut tree, control).unwrap());
/// assert_eq!(tree.get(control, opacity).unwrap(), 1.0);
/// assert_eq!(fade.state(control), ActionState::Idle);
/// ```
#[derive(Debug)]
pub struct Action<T: PropertyValue> {
    property: Property<T>,
    value: T,
    target_name: Option<String>,
    kind: ActionKind,
    data: HashMap<ElementId, ActionData<T>>,
}

impl<T: PropertyValue> Action<T> {
    /// An action that applies `value` immediately.
    #[must_use]
    pub fn property(property: Property<T>, value: T) -> Self {
        Self {
            property,
            value,
            target_name: None,
            kind: ActionKind::Property,
            data: HashMap::new(),
        }
    }

    /// An action carrying animation timing.
    #[must_use]
    pub fn animate(property: Property<T>, value: T, duration: Duration, delay: Duration) -> Self {
        Self {
            kind: ActionKind::Animate { duration, delay },
            ..Self::property(property, value)
        }
    }

    /// Targets the element named `name` inside the control instead of the
    /// control itself.
    #[must_use]
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target_name = Some(name.into());
        self
    }

    /// The property written.
    #[must_use]
    pub fn target_property(&self) -> Property<T> {
        self.property
    }

    /// The value written on start.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The named target, if any.
    #[must_use]
    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    /// The record for `control`, if the action ever ran on it.
    #[must_use]
    pub fn data(&self, control: ElementId) -> Option<&ActionData<T>> {
        self.data.get(&control)
    }
}

/// Object-safe view of an [`Action`], used by [`Effect`](crate::Effect).
pub trait AnyAction {
    /// Applies the action to `control`. Returns `true` on an Idle → Active
    /// transition. A missing named target is logged and leaves the action Idle.
    fn start(&mut self, tree: &mut ElementTree, control: ElementId) -> Result<bool, ElementError>;

    /// Restores the captured value. Returns `true` on an Active → Idle transition.
    fn reverse(&mut self, tree: &mut ElementTree, control: ElementId) -> Result<bool, ElementError>;

    /// State for `control`; Idle if it never ran.
    fn state(&self, control: ElementId) -> ActionState;

    /// The property this action writes.
    fn property_id(&self) -> PropertyId;

    /// Flavour and timing.
    fn kind(&self) -> ActionKind;

    /// Drops every per-control record.
    fn clear_data(&mut self);
}

impl<T: PropertyValue> AnyAction for Action<T> {
    fn start(&mut self, tree: &mut ElementTree, control: ElementId) -> Result<bool, ElementError> {
        if self.state(control) == ActionState::Active {
            return Ok(false);
        }
        let Some(target) = resolve(tree, control, self.target_name.as_deref()) else {
            log::warn!(
                "action target {:?} not found under {control:?}",
                self.target_name
            );
            return Ok(false);
        };
        let start = tree.get_local(target, self.property);
        tree.set(target, self.property, self.value.clone())?;
        self.data.insert(
            control,
            ActionData {
                target,
                start,
                state: ActionState::Active,
            },
        );
        Ok(true)
    }

    fn reverse(&mut self, tree: &mut ElementTree, control: ElementId) -> Result<bool, ElementError> {
        let Some(data) = self.data.get_mut(&control) else {
            return Ok(false);
        };
        if data.state != ActionState::Active {
            return Ok(false);
        }
        data.state = ActionState::Idle;
        if !tree.is_alive(data.target) {
            log::debug!("action target {:?} is gone; nothing to restore", data.target);
            return Ok(true);
        }
        match data.start.take() {
            Some(v) => tree.set(data.target, self.property, v)?,
            None => tree.clear(data.target, self.property)?,
        };
        Ok(true)
    }

    fn state(&self, control: ElementId) -> ActionState {
        self.data.get(&control).map(|d| d.state).unwrap_or_default()
    }

    fn property_id(&self) -> PropertyId {
        self.property.id()
    }

    fn kind(&self) -> ActionKind {
        self.kind
    }

    fn clear_data(&mut self) {
        self.data.clear();
    }
}
