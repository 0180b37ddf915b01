// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route construction.

use smallvec::SmallVec;

use crate::id::RoutingStrategy;

/// An ordered list of elements an event visits.
pub type Route<K> = SmallVec<[K; 16]>;

/// Builds the visiting order for an event raised on `target`.
///
/// `parent` maps an element to its parent; the walk ends at the first
/// element without one.
///
/// ```
/// use uxml_event::{RoutingStrategy, build_route};
///
/// // 3 -> 2 -> 1 (root)
/// let parent = |k: u32| (k > 1).then(|| k - 1);
/// assert_eq!(build_route(RoutingStrategy::Direct, 3, parent).as_slice(), [3]);
/// assert_eq!(build_route(RoutingStrategy::Bubble, 3, parent).as_slice(), [3, 2, 1]);
/// assert_eq!(build_route(RoutingStrategy::DrillDown, 3, parent).as_slice(), [1, 2, 3]);
/// ```
pub fn build_route<K, F>(strategy: RoutingStrategy, target: K, parent: F) -> Route<K>
where
    K: Copy,
    F: Fn(K) -> Option<K>,
{
    let mut route = Route::new();
    route.push(target);
    if strategy == RoutingStrategy::Direct {
        return route;
    }
    let mut current = target;
    while let Some(p) = parent(current) {
        route.push(p);
        current = p;
    }
    if strategy == RoutingStrategy::DrillDown {
        route.reverse();
    }
    route
}
