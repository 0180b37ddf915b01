// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Event: routed event definitions, class handlers and listeners.
//!
//! ## Overview
//!
//! An event definition is identified by its name and owner type and carries a
//! payload type and a [`RoutingStrategy`]. Definitions live in an
//! [`EventRegistry`] and are handed out as typed [`RoutedEvent<A>`] handles.
//!
//! Two kinds of handler exist:
//!
//! - **Class handlers** are registered per type in the [`EventRegistry`]. For
//!   an element, the handler of the most-derived type in its chain that has
//!   any handler is used; base-type handlers are not chained.
//! - **Instance listeners** live in an element's [`EventNotifier`] and run in
//!   registration order after the class handler.
//!
//! ## Routing
//!
//! [`build_route`] turns a target and a parent lookup into the visiting order:
//!
//! - [`RoutingStrategy::Direct`]: the target only.
//! - [`RoutingStrategy::Bubble`]: target up to the root.
//! - [`RoutingStrategy::DrillDown`]: root down to the target.
//!
//! [`dispatcher::run`] walks the route and stops before the next element once
//! a handler sets [`EventArgs::handled`].
//!
//! ## Failures
//!
//! A handler that returns [`HandlerError`] is logged through `log::warn!` and
//! counted in the [`DispatchReport`]; later handlers still run.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod args;
pub mod dispatcher;
mod error;
mod handler;
mod id;
mod notifier;
mod registry;
mod route;

pub use args::EventArgs;
pub use error::{EventError, HandlerError};
pub use handler::{DispatchReport, Handler, handler, invoke_all};
pub use id::{EventId, RoutedEvent, RoutingStrategy};
pub use notifier::{EventNotifier, Listeners};
pub use registry::{EventDefinition, EventRegistry};
pub use route::{Route, build_route};
