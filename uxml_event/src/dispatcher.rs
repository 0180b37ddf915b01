// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a route and honor the `handled` flag.
//!
//! - Entries are visited in route order.
//! - Before each entry `args.current` is set to it.
//! - Once a visit leaves `args.handled` set, no further entries are visited.
//!
//! The visit callback decides what runs at each element; element trees run
//! the resolved class handler first and then the instance listeners.
//!
//! ```
//! use uxml_event::{DispatchReport, EventArgs, EventRegistry, RoutingStrategy, dispatcher};
//! use uxml_types::TypeRegistry;
//!
//! let mut types = TypeRegistry::new();
//! let element = types.register("UxmlElement", None);
//! let mut events = EventRegistry::new();
//! let down = events.register::<()>("MouseDown", element, RoutingStrategy::Bubble);
//!
//! // Bubble from C (3) through B (2) to A (1); B handles it.
//! let mut seen = Vec::new();
//! let mut args = EventArgs::new(down, 3_u32, ());
//! dispatcher::run(&[3, 2, 1], &mut args, |k, args| {
//!     seen.push(k);
//!     if k == 2 {
//!         args.handled = true;
//!     }
//!     DispatchReport::default()
//! });
//! assert_eq!(seen, [3, 2]);
//! assert!(args.handled);
//! ```

use crate::args::EventArgs;
use crate::handler::DispatchReport;

/// Visits `route` in order until `args.handled` is set.
pub fn run<K, A>(
    route: &[K],
    args: &mut EventArgs<K, A>,
    mut visit: impl FnMut(K, &mut EventArgs<K, A>) -> DispatchReport,
) -> DispatchReport
where
    K: Copy,
{
    let mut report = DispatchReport::default();
    for &k in route {
        if args.handled {
            break;
        }
        args.current = k;
        report += visit(k, args);
    }
    report
}
