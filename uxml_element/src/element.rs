// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use smallvec::SmallVec;
use uxml_event::EventNotifier;
use uxml_property::{PropertyObject, PropertyStore};
use uxml_types::{TypeChain, TypeTag};

use crate::id::ElementId;
use crate::tree::ElementTree;

/// One node of an [`ElementTree`].
///
/// Structure is changed through the tree; the element itself only exposes
/// read access plus its property store.
#[derive(Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) chain: TypeChain,
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: SmallVec<[ElementId; 4]>,
    pub(crate) chrome: Option<ElementId>,
    pub(crate) store: PropertyStore<ElementId>,
    pub(crate) notifier: EventNotifier<ElementTree, ElementId>,
}

impl Element {
    pub(crate) fn new(id: ElementId, chain: TypeChain, name: Option<String>) -> Self {
        Self {
            id,
            chain,
            name,
            parent: None,
            children: SmallVec::new(),
            chrome: None,
            store: PropertyStore::new(id),
            notifier: EventNotifier::new(),
        }
    }

    /// This element's handle.
    #[must_use]
    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Most-derived type.
    #[must_use]
    #[inline]
    pub fn element_type(&self) -> TypeTag {
        self.chain.most_derived()
    }

    /// The name used by [`ElementTree::find_name`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent element. For a chrome root this is the control it decorates.
    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Content children in insertion order.
    #[must_use]
    #[inline]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Root of the chrome (visual template) subtree.
    #[must_use]
    #[inline]
    pub fn chrome(&self) -> Option<ElementId> {
        self.chrome
    }

    /// The element's instance listeners.
    #[must_use]
    #[inline]
    pub fn notifier(&self) -> &EventNotifier<ElementTree, ElementId> {
        &self.notifier
    }
}

impl PropertyObject<ElementId> for Element {
    fn property_store(&self) -> &PropertyStore<ElementId> {
        &self.store
    }

    fn property_store_mut(&mut self) -> &mut PropertyStore<ElementId> {
        &mut self.store
    }

    fn key(&self) -> ElementId {
        self.id
    }

    fn parent_key(&self) -> Option<ElementId> {
        self.parent
    }

    fn type_chain(&self) -> &TypeChain {
        &self.chain
    }
}
