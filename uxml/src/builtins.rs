// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element types, properties and events every UXML tree starts with.

use kurbo::Point;
use peniko::Color;
use uxml_element::{ElementArgs, ElementId, ElementTree, PropertyChangedArgs, Registries};
use uxml_event::{HandlerError, RoutedEvent, RoutingStrategy};
use uxml_property::{Property, PropertyFlags, PropertyMetadataBuilder};
use uxml_types::TypeTag;

/// Coarse display mode of a control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Regular size.
    #[default]
    Normal,
    /// Collapsed to a title or icon.
    Minimized,
    /// Filling its container.
    Maximized,
}

/// How a panel moves its children when their layout changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    /// Jump to the new layout.
    #[default]
    Immediate,
    /// Ask the host to interpolate towards the new layout.
    Animated,
}

/// Payload of the built-in mouse events.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseArgs {
    /// Pointer position in host coordinates.
    pub position: Point,
    /// Pointer position in the hit surface's local coordinates.
    pub local: Point,
    /// Host pointer identifier.
    pub pointer_id: u32,
}

/// Handles to the built-in types, properties and events.
///
/// Obtained from [`Builtins::register`] while the registries are still open:
///
/// ```
/// use std::rc::Rc;
/// use uxml::{Builtins, ElementTree, Registries};
///
/// let mut registries = Registries::new("UxmlElement");
/// let b = Builtins::register(&mut registries);
/// registries.seal();
///
/// let mut tree = ElementTree::new(Rc::new(registries));
/// let panel = tree.create(b.panel);
/// assert_eq!(tree.get(panel, b.opacity), Ok(1.0));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Builtins {
    /// Base of every element type.
    pub element: TypeTag,
    /// Interactive element with a view state and swappable chrome.
    pub control: TypeTag,
    /// Container that arranges children.
    pub panel: TypeTag,
    /// Control presenting a single content element.
    pub content_control: TypeTag,

    /// Horizontal offset in the parent.
    pub left: Property<f64>,
    /// Vertical offset in the parent.
    pub top: Property<f64>,
    /// Layout width.
    pub width: Property<f64>,
    /// Layout height.
    pub height: Property<f64>,
    /// Fill painted behind the element's bounds.
    pub background: Property<Option<Color>>,
    /// Opacity in `[0, 1]`, applied to the background.
    pub opacity: Property<f64>,
    /// Hidden elements neither paint nor receive input.
    pub is_visible: Property<bool>,
    /// Display mode of a control.
    pub view_state: Property<ViewState>,
    /// `Panel.AnimationMode`, attachable to any element.
    pub animation_mode: Property<AnimationMode>,
    /// Content element of a content control.
    pub content: Property<Option<ElementId>>,

    /// Pointer pressed; bubbles.
    pub mouse_down: RoutedEvent<MouseArgs>,
    /// Pointer released; bubbles.
    pub mouse_up: RoutedEvent<MouseArgs>,
    /// Pointer moved; bubbles.
    pub mouse_move: RoutedEvent<MouseArgs>,
    /// Pointer pressed; drills down before [`mouse_down`](Self::mouse_down).
    pub preview_mouse_down: RoutedEvent<MouseArgs>,
    /// Press and release over the same element; direct.
    pub click: RoutedEvent<MouseArgs>,
    /// Raised on every effective property change; direct.
    pub property_changed: RoutedEvent<PropertyChangedArgs>,
}

impl Builtins {
    /// Registers the built-ins.
    ///
    /// The root type of `registries` plays the role of `UxmlElement`.
    ///
    /// # Panics
    ///
    /// Panics if the registries are sealed or already hold a built-in name on
    /// the same owner.
    pub fn register(registries: &mut Registries) -> Self {
        let element = registries.root_type();
        let types = &mut registries.types;
        let control = types.register("Control", Some(element));
        let panel = types.register("Panel", Some(element));
        let content_control = types.register("ContentControl", Some(control));

        let types = &registries.types;
        let props = &mut registries.properties;
        let layout = |default: f64| {
            PropertyMetadataBuilder::new(default)
                .flags(PropertyFlags::AFFECTS_LAYOUT)
                .build()
        };
        let left = props.register(types, "Left", element, layout(0.0));
        let top = props.register(types, "Top", element, layout(0.0));
        let width = props.register(types, "Width", element, layout(0.0));
        let height = props.register(types, "Height", element, layout(0.0));
        let background = props.register(
            types,
            "Background",
            element,
            PropertyMetadataBuilder::new(None)
                .flags(PropertyFlags::AFFECTS_RENDER)
                .build(),
        );
        let opacity = props.register(
            types,
            "Opacity",
            element,
            PropertyMetadataBuilder::new(1.0_f64)
                .flags(PropertyFlags::AFFECTS_RENDER)
                .coerce(|v: f64| if v.is_nan() { 1.0 } else { v.clamp(0.0, 1.0) })
                .build(),
        );
        let is_visible = props.register(
            types,
            "IsVisible",
            element,
            PropertyMetadataBuilder::new(true)
                .flags(PropertyFlags::AFFECTS_RENDER)
                .build(),
        );
        let view_state = props.register(
            types,
            "ViewState",
            control,
            PropertyMetadataBuilder::new(ViewState::Normal)
                .flags(PropertyFlags::AFFECTS_LAYOUT)
                .build(),
        );
        let animation_mode = props.register(
            types,
            "AnimationMode",
            panel,
            PropertyMetadataBuilder::new(AnimationMode::Immediate)
                .attached()
                .build(),
        );
        let content = props.register(
            types,
            "Content",
            content_control,
            PropertyMetadataBuilder::new(None)
                .flags(PropertyFlags::CONTENT | PropertyFlags::AFFECTS_LAYOUT)
                .build(),
        );

        let events = &mut registries.events;
        let mouse_down = events.register("MouseDown", element, RoutingStrategy::Bubble);
        let mouse_up = events.register("MouseUp", element, RoutingStrategy::Bubble);
        let mouse_move = events.register("MouseMove", element, RoutingStrategy::Bubble);
        let preview_mouse_down =
            events.register("PreviewMouseDown", element, RoutingStrategy::DrillDown);
        let click = events.register("Click", element, RoutingStrategy::Direct);
        let property_changed = registries.property_changed();

        registries.events.add_class_handler(
            property_changed,
            content_control,
            move |tree: &mut ElementTree, args: &mut ElementArgs<PropertyChangedArgs>| {
                sync_content(tree, args.source, content, &args.payload)
            },
        );

        log::debug!("registered UXML built-ins");
        Self {
            element,
            control,
            panel,
            content_control,
            left,
            top,
            width,
            height,
            background,
            opacity,
            is_visible,
            view_state,
            animation_mode,
            content,
            mouse_down,
            mouse_up,
            mouse_move,
            preview_mouse_down,
            click,
            property_changed,
        }
    }
}

/// Keeps a content control's only child in step with its `Content` value.
fn sync_content(
    tree: &mut ElementTree,
    control: ElementId,
    content: Property<Option<ElementId>>,
    args: &PropertyChangedArgs,
) -> Result<(), HandlerError> {
    let (Some(old), Some(new)) = (
        args.change.old_value(content),
        args.change.new_value(content),
    ) else {
        return Ok(());
    };
    let fail = |e: uxml_element::ElementError| HandlerError::new(alloc::format!("Content: {e}"));
    if let Some(old) = *old
        && tree.parent(old) == Some(control)
    {
        tree.detach_child(old).map_err(fail)?;
    }
    if let Some(new) = *new {
        tree.add_child(control, new).map_err(fail)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use uxml_property::PropertyError;

    fn tree() -> (ElementTree, Builtins) {
        let mut r = Registries::new("UxmlElement");
        let b = Builtins::register(&mut r);
        r.seal();
        (ElementTree::new(Rc::new(r)), b)
    }

    #[test]
    fn type_hierarchy() {
        let (tree, b) = tree();
        let types = &tree.registries().types;
        assert!(types.is_assignable(b.content_control, b.control));
        assert!(types.is_assignable(b.panel, b.element));
        assert!(!types.is_assignable(b.panel, b.control));
        assert_eq!(types.name(b.element), Some("UxmlElement"));
    }

    #[test]
    fn view_state_only_applies_to_controls() {
        let (mut tree, b) = tree();
        let panel = tree.create(b.panel);
        let control = tree.create(b.control);
        assert!(matches!(
            tree.set(panel, b.view_state, ViewState::Maximized),
            Err(uxml_element::ElementError::Property(PropertyError::NotApplicable { .. }))
        ));
        assert_eq!(tree.set(control, b.view_state, ViewState::Maximized), Ok(true));
    }

    #[test]
    fn animation_mode_attaches_anywhere() {
        let (mut tree, b) = tree();
        let control = tree.create(b.control);
        assert_eq!(tree.get(control, b.animation_mode), Ok(AnimationMode::Immediate));
        assert_eq!(tree.set(control, b.animation_mode, AnimationMode::Animated), Ok(true));
    }

    #[test]
    fn opacity_is_clamped() {
        let (mut tree, b) = tree();
        let e = tree.create(b.element);
        tree.set(e, b.opacity, 3.0).unwrap();
        assert_eq!(tree.get(e, b.opacity), Ok(1.0));
        tree.set(e, b.opacity, -1.0).unwrap();
        assert_eq!(tree.get(e, b.opacity), Ok(0.0));
    }

    #[test]
    fn content_is_mirrored_as_the_child() {
        let (mut tree, b) = tree();
        let host = tree.create(b.content_control);
        let first = tree.create(b.element);
        let second = tree.create(b.element);
        tree.set(host, b.content, Some(first)).unwrap();
        assert_eq!(tree.children(host), &[first]);
        tree.set(host, b.content, Some(second)).unwrap();
        assert_eq!(tree.children(host), &[second]);
        assert_eq!(tree.parent(first), None);
        tree.clear(host, b.content).unwrap();
        assert!(tree.children(host).is_empty());
    }

    #[test]
    fn mouse_events_route_as_declared() {
        let (tree, b) = tree();
        assert_eq!(b.mouse_down.routing(), RoutingStrategy::Bubble);
        assert_eq!(b.preview_mouse_down.routing(), RoutingStrategy::DrillDown);
        assert_eq!(b.click.routing(), RoutingStrategy::Direct);
        let chain = tree.registries().types.chain(b.control);
        assert_eq!(
            tree.registries().events.find("Click", &chain),
            Some(b.click.id())
        );
    }
}
