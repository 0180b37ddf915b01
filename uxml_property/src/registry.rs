// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The property registry.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use hashbrown::HashMap;
use smallvec::SmallVec;
use uxml_types::{TypeChain, TypeRegistry, TypeTag};

use crate::error::PropertyError;
use crate::flags::PropertyFlags;
use crate::id::{Property, PropertyId};
use crate::metadata::PropertyMetadata;
use crate::value::{ErasedValue, PropertyValue};

/// A registered property definition.
pub struct PropertyRegistration {
    name: &'static str,
    owner: TypeTag,
    type_id: TypeId,
    metadata: Box<dyn ErasedMetadata>,
}

impl PropertyRegistration {
    /// Property name.
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

    /// The [`TypeId`] of the value type.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Definition flags.
    #[must_use]
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.metadata.flags()
    }

    /// Whether this is an attached property.
    #[must_use]
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.flags().contains(PropertyFlags::ATTACHED)
    }

    /// Whether the value is inherited along the parent chain.
    #[must_use]
    #[inline]
    pub fn inherits(&self) -> bool {
        self.metadata.inherits()
    }

    /// The default value, erased.
    #[must_use]
    pub fn default_erased(&self) -> ErasedValue {
        self.metadata.default_erased()
    }

    /// Whether an element with `chain` may hold a value for this property.
    #[must_use]
    #[inline]
    pub fn applies_to(&self, chain: &TypeChain) -> bool {
        self.is_attached() || chain.contains(self.owner)
    }
}

impl core::fmt::Debug for PropertyRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistration")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("type_id", &self.type_id)
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}

/// Registry of property definitions.
///
/// Properties are registered once during startup and the registry is then
/// [sealed](Self::seal); elements only hold [`PropertyId`]s into it.
///
/// The same name may be registered on several owner types. Registration is
/// rejected when the (name, owner) pair already exists, or when a related
/// owner (an ancestor or descendant) uses the name with a different value
/// type. A more-derived owner with the same value type shadows the base
/// definition for [`find`](Self::find).
///
/// ```rust
/// use uxml_property::{PropertyMetadataBuilder, PropertyRegistry};
/// use uxml_types::TypeRegistry;
///
/// let mut types = TypeRegistry::new();
/// let element = types.register("UxmlElement", None);
/// let panel = types.register("Panel", Some(element));
/// let stack = types.register("StackPanel", Some(panel));
///
/// let mut registry = PropertyRegistry::new();
/// let base = registry.register(&types, "Padding", panel, PropertyMetadataBuilder::new(0.0_f64).build());
/// let shadow = registry.register(&types, "Padding", stack, PropertyMetadataBuilder::new(4.0_f64).build());
///
/// assert_eq!(registry.find("Padding", &types.chain(stack)), Some(shadow.id()));
/// assert_eq!(registry.find("Padding", &types.chain(panel)), Some(base.id()));
/// assert_eq!(registry.find("Padding", &types.chain(element)), None);
/// ```
#[derive(Default)]
pub struct PropertyRegistry {
    properties: Vec<PropertyRegistration>,
    by_name: HashMap<&'static str, SmallVec<[PropertyId; 2]>>,
    sealed: bool,
}

impl PropertyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property, returning an error on misconfiguration.
    pub fn try_register<T: PropertyValue>(
        &mut self,
        types: &TypeRegistry,
        name: &'static str,
        owner: TypeTag,
        metadata: PropertyMetadata<T>,
    ) -> Result<Property<T>, PropertyError> {
        if self.sealed {
            return Err(PropertyError::Sealed);
        }
        let type_id = TypeId::of::<T>();
        for id in self.by_name.get(name).into_iter().flatten() {
            let existing = &self.properties[id.index() as usize];
            if existing.owner == owner {
                return Err(PropertyError::Duplicate { name, owner });
            }
            if existing.type_id != type_id && types.related(existing.owner, owner) {
                return Err(PropertyError::Incompatible { name });
            }
        }
        let index = u16::try_from(self.properties.len()).map_err(|_| PropertyError::TooMany)?;
        if index == u16::MAX {
            return Err(PropertyError::TooMany);
        }
        let id = PropertyId::new(index);
        log::debug!(
            "registered property {name} on {owner:?} as {id:?} ({:?})",
            metadata.flags()
        );
        self.properties.push(PropertyRegistration {
            name,
            owner,
            type_id,
            metadata: Box::new(metadata),
        });
        self.by_name.entry(name).or_default().push(id);
        Ok(Property::from_id(id))
    }

    /// Registers a property.
    ///
    /// # Panics
    ///
    /// Panics on any [`PropertyError`]; an inconsistent registry is a startup bug.
    pub fn register<T: PropertyValue>(
        &mut self,
        types: &TypeRegistry,
        name: &'static str,
        owner: TypeTag,
        metadata: PropertyMetadata<T>,
    ) -> Property<T> {
        match self.try_register(types, name, owner, metadata) {
            Ok(p) => p,
            Err(e) => panic!("{e}"),
        }
    }

    /// Forbids further registration.
    pub fn seal(&mut self) {
        log::debug!("property registry sealed with {} definitions", self.len());
        self.sealed = true;
    }

    /// Returns `true` once sealed.
    #[must_use]
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the registration for `id`.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyRegistration> {
        self.properties.get(id.index() as usize)
    }

    /// Returns the name of `id`.
    #[must_use]
    pub fn name(&self, id: PropertyId) -> Option<&'static str> {
        self.get(id).map(|r| r.name)
    }

    /// Returns the flags of `id`, empty if unknown.
    #[must_use]
    pub fn flags(&self, id: PropertyId) -> PropertyFlags {
        self.get(id).map(PropertyRegistration::flags).unwrap_or_default()
    }

    /// Returns the typed metadata for `property`.
    #[must_use]
    pub fn metadata<T: PropertyValue>(&self, property: Property<T>) -> Option<&PropertyMetadata<T>> {
        self.get(property.id())
            .and_then(|r| r.metadata.as_any().downcast_ref())
    }

    /// Looks up the definition of `name` on exactly `owner`.
    #[must_use]
    pub fn find_owned(&self, name: &str, owner: TypeTag) -> Option<PropertyId> {
        self.by_name
            .get(name)?
            .iter()
            .copied()
            .find(|id| self.properties[id.index() as usize].owner == owner)
    }

    /// Resolves `name` for an element with `chain`.
    ///
    /// Walks the chain from most-derived to base and returns the first owner
    /// match. If none matches, the first attached property of that name (in
    /// registration order) is returned.
    #[must_use]
    pub fn find(&self, name: &str, chain: &TypeChain) -> Option<PropertyId> {
        let candidates = self.by_name.get(name)?;
        for tag in chain.iter() {
            if let Some(id) = candidates
                .iter()
                .copied()
                .find(|id| self.properties[id.index() as usize].owner == tag)
            {
                return Some(id);
            }
        }
        candidates
            .iter()
            .copied()
            .find(|id| self.properties[id.index() as usize].is_attached())
    }

    /// Checks that `id` may be written on an element with `chain`.
    pub fn check_applicable(&self, id: PropertyId, chain: &TypeChain) -> Result<(), PropertyError> {
        let registration = self.get(id).ok_or(PropertyError::Unregistered(id))?;
        if registration.applies_to(chain) {
            Ok(())
        } else {
            Err(PropertyError::NotApplicable {
                name: registration.name,
                element_type: chain.most_derived(),
            })
        }
    }

    /// Iterates over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyRegistration)> {
        self.properties.iter().enumerate().map(|(i, r)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            let index = i as u16;
            (PropertyId::new(index), r)
        })
    }

    /// Iterates over the definitions applicable to an element with `chain`.
    pub fn applicable<'a>(
        &'a self,
        chain: &'a TypeChain,
    ) -> impl Iterator<Item = (PropertyId, &'a PropertyRegistration)> + 'a {
        self.iter().filter(move |(_, r)| r.applies_to(chain))
    }
}

impl core::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.properties.len())
            .field("sealed", &self.sealed)
            .field(
                "properties",
                &self.properties.iter().map(|r| r.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

trait ErasedMetadata: Any {
    fn as_any(&self) -> &dyn Any;
    fn flags(&self) -> PropertyFlags;
    fn inherits(&self) -> bool;
    fn default_erased(&self) -> ErasedValue;
}

impl<T: PropertyValue> ErasedMetadata for PropertyMetadata<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn flags(&self) -> PropertyFlags {
        Self::flags(self)
    }

    fn inherits(&self) -> bool {
        Self::inherits(self)
    }

    fn default_erased(&self) -> ErasedValue {
        ErasedValue::new(self.default_value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PropertyMetadataBuilder;
    use alloc::format;

    struct Fixture {
        types: TypeRegistry,
        element: TypeTag,
        control: TypeTag,
        panel: TypeTag,
    }

    fn fixture() -> Fixture {
        let mut types = TypeRegistry::new();
        let element = types.register("UxmlElement", None);
        let control = types.register("Control", Some(element));
        let panel = types.register("Panel", Some(element));
        Fixture {
            types,
            element,
            control,
            panel,
        }
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        let a = registry.register(&fx.types, "Width", fx.element, PropertyMetadata::new(0.0_f64));
        let b = registry.register(&fx.types, "Height", fx.element, PropertyMetadata::new(0.0_f64));
        assert_eq!(a.id().index(), 0);
        assert_eq!(b.id().index(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(b.id()), Some("Height"));
    }

    #[test]
    fn duplicate_on_same_owner_rejected() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        registry.register(&fx.types, "Width", fx.element, PropertyMetadata::new(0.0_f64));
        let err = registry
            .try_register(&fx.types, "Width", fx.element, PropertyMetadata::new(1.0_f64))
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::Duplicate {
                name: "Width",
                owner: fx.element
            }
        );
    }

    #[test]
    fn same_name_on_unrelated_owners_is_legal() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        let on_control =
            registry.register(&fx.types, "Mode", fx.control, PropertyMetadata::new(0_u8));
        let on_panel = registry.register(
            &fx.types,
            "Mode",
            fx.panel,
            PropertyMetadata::new(alloc::string::String::new()),
        );
        assert_ne!(on_control.id(), on_panel.id());
        assert_eq!(registry.find_owned("Mode", fx.panel), Some(on_panel.id()));
    }

    #[test]
    fn related_owner_with_other_value_type_rejected() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        registry.register(&fx.types, "Tag", fx.element, PropertyMetadata::new(0_i32));
        let err = registry
            .try_register(&fx.types, "Tag", fx.control, PropertyMetadata::new(0.0_f64))
            .unwrap_err();
        assert_eq!(err, PropertyError::Incompatible { name: "Tag" });
    }

    #[test]
    fn find_falls_back_to_attached() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        let mode = registry.register(
            &fx.types,
            "AnimationMode",
            fx.panel,
            PropertyMetadataBuilder::new(0_u8).attached().build(),
        );
        let chain = fx.types.chain(fx.control);
        assert_eq!(registry.find("AnimationMode", &chain), Some(mode.id()));
        assert!(registry.check_applicable(mode.id(), &chain).is_ok());
    }

    #[test]
    fn non_attached_not_applicable_outside_owner() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        let orientation =
            registry.register(&fx.types, "Orientation", fx.panel, PropertyMetadata::new(0_u8));
        let chain = fx.types.chain(fx.control);
        assert_eq!(
            registry.check_applicable(orientation.id(), &chain),
            Err(PropertyError::NotApplicable {
                name: "Orientation",
                element_type: fx.control
            })
        );
        assert_eq!(registry.applicable(&chain).count(), 0);
    }

    #[test]
    fn sealed_rejects_registration() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        registry.seal();
        assert!(registry.is_sealed());
        assert_eq!(
            registry
                .try_register(&fx.types, "Late", fx.element, PropertyMetadata::new(0_u8))
                .unwrap_err(),
            PropertyError::Sealed
        );
    }

    #[test]
    fn typed_metadata_lookup() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        let opacity = registry.register(
            &fx.types,
            "Opacity",
            fx.element,
            PropertyMetadataBuilder::new(1.0_f64)
                .flags(PropertyFlags::AFFECTS_RENDER)
                .build(),
        );
        assert_eq!(registry.metadata(opacity).map(|m| *m.default_value()), Some(1.0));
        assert!(registry.flags(opacity.id()).contains(PropertyFlags::AFFECTS_RENDER));
        assert_eq!(
            registry.get(opacity.id()).map(PropertyRegistration::default_erased),
            Some(ErasedValue::new(1.0_f64))
        );
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn register_panics_on_duplicate() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        registry.register(&fx.types, "Width", fx.element, PropertyMetadata::new(0.0_f64));
        registry.register(&fx.types, "Width", fx.element, PropertyMetadata::new(0.0_f64));
    }

    #[test]
    fn debug_lists_names() {
        let fx = fixture();
        let mut registry = PropertyRegistry::new();
        registry.register(&fx.types, "Width", fx.element, PropertyMetadata::new(0.0_f64));
        assert!(format!("{registry:?}").contains("Width"));
    }
}
