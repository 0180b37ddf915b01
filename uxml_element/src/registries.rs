// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxml_event::{EventRegistry, RoutedEvent, RoutingStrategy};
use uxml_property::{PropertyChange, PropertyRegistry};
use uxml_types::{TypeRegistry, TypeTag};

/// Payload of the built-in `PropertyChanged` event.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChangedArgs {
    /// The effective-value transition.
    pub change: PropertyChange,
}

/// The type, property and event registries an element tree works against.
///
/// Built once at startup, [sealed](Self::seal), and then shared by `Rc`
/// between trees. [`new`](Self::new) registers the root element type and the
/// `PropertyChanged` event every tree raises.
#[derive(Debug)]
pub struct Registries {
    /// Element types.
    pub types: TypeRegistry,
    /// Property definitions.
    pub properties: PropertyRegistry,
    /// Event definitions and class handlers.
    pub events: EventRegistry,
    root_type: TypeTag,
    property_changed: RoutedEvent<PropertyChangedArgs>,
}

impl Registries {
    /// Creates registries with `root_type_name` as the base element type.
    #[must_use]
    pub fn new(root_type_name: &'static str) -> Self {
        let mut types = TypeRegistry::new();
        let root_type = types.register(root_type_name, None);
        let mut events = EventRegistry::new();
        let property_changed = events.register("PropertyChanged", root_type, RoutingStrategy::Direct);
        Self {
            types,
            properties: PropertyRegistry::new(),
            events,
            root_type,
            property_changed,
        }
    }

    /// The base element type.
    #[must_use]
    #[inline]
    pub fn root_type(&self) -> TypeTag {
        self.root_type
    }

    /// The event raised on every effective property change.
    #[must_use]
    #[inline]
    pub fn property_changed(&self) -> RoutedEvent<PropertyChangedArgs> {
        self.property_changed
    }

    /// Seals all three registries.
    pub fn seal(&mut self) {
        self.types.seal();
        self.properties.seal();
        self.events.seal();
    }

    /// Returns `true` once [`seal`](Self::seal) has run.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.types.is_sealed() && self.properties.is_sealed() && self.events.is_sealed()
    }
}
