// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML: a retained UI core with typed properties, routed events and
//! display-list surfaces.
//!
//! This crate ties the UXML building blocks together and re-exports them:
//!
//! - [`uxml_types`]: the element type hierarchy.
//! - [`uxml_property`]: property definitions and sparse storage.
//! - [`uxml_event`]: event definitions, listeners and routing.
//! - [`uxml_update`]: the deferred update queue.
//! - [`uxml_element`]: the element tree.
//! - [`uxml_effect`]: reversible actions triggered by property values.
//! - [`uxml_surface`]: display lists, hit testing and painting.
//!
//! On top it provides the [`Builtins`] every tree starts with and a [`Host`]
//! that connects a tree to a platform view.
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::Point;
//! use peniko::Color;
//! use uxml::{Builtins, Host, HostConfig, RecordingCanvas, Registries, TouchEvent, TouchPhase};
//!
//! let mut registries = Registries::new("UxmlElement");
//! let b = Builtins::register(&mut registries);
//! registries.seal();
//!
//! let mut host = Host::new(Rc::new(registries), b, HostConfig::default());
//! let root = host.root();
//! let button = host.tree_mut().create(b.control);
//! host.tree_mut().add_child(root, button).unwrap();
//! host.tree_mut().set(button, b.left, 10.0).unwrap();
//! host.tree_mut().set(button, b.width, 80.0).unwrap();
//! host.tree_mut().set(button, b.height, 30.0).unwrap();
//! host.tree_mut().set(button, b.background, Some(Color::WHITE)).unwrap();
//! host.create_surface(button).unwrap();
//!
//! host.on_measure(200.0, 100.0);
//! let mut canvas = RecordingCanvas::new();
//! host.on_draw(&mut canvas);
//! assert_eq!(canvas.draws().count(), 1);
//!
//! let down = TouchEvent::new(TouchPhase::Down, Point::new(20.0, 10.0));
//! assert_eq!(host.on_touch_event(down).unwrap(), button);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `peniko/std`.
//! - `libm`: forwards to `kurbo/libm` and `peniko/libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builtins;
mod effects;
mod host;

pub use builtins::{AnimationMode, Builtins, MouseArgs, ViewState};
pub use effects::{bind_effect, rebind_effect};
pub use host::{DrainReport, Host, HostConfig, HostError, TouchEvent, TouchPhase, UpdateHook};

pub use uxml_effect::{Action, ActionKind, ActionState, AnyAction, Effect, Trigger};
pub use uxml_element::{
    ElementArgs, ElementError, ElementHandler, ElementId, ElementTree, PropertyChangedArgs,
    Registries,
};
pub use uxml_event::{HandlerError, RoutedEvent, RoutingStrategy, handler};
pub use uxml_property::{Property, PropertyFlags, PropertyMetadata, PropertyMetadataBuilder};
pub use uxml_surface::{
    Canvas, CanvasOp, DisplayItem, DisplayList, Paint, Pen, RecordingCanvas, SurfaceId,
    SurfaceTree,
};
pub use uxml_update::UpdateKind;

pub use uxml_effect;
pub use uxml_element;
pub use uxml_event;
pub use uxml_property;
pub use uxml_surface;
pub use uxml_types;
pub use uxml_update;
