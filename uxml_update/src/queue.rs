// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pending-update queue.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::kind::UpdateKind;

/// Pending (kind, source) pairs in first-request order.
///
/// The queue has set semantics per pair: asking for the same update twice
/// before a [`drain`](Self::drain) is a no-op. A generation counter advances
/// on every mutation so callers can detect whether new work arrived.
#[derive(Debug, Clone)]
pub struct UpdateQueue<K>
where
    K: Copy + Eq + Hash,
{
    order: Vec<(UpdateKind, K)>,
    pending: HashSet<(UpdateKind, K)>,
    generation: u64,
}

impl<K> Default for UpdateQueue<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> UpdateQueue<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            pending: HashSet::new(),
            generation: 0,
        }
    }

    /// The current generation.
    #[must_use]
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests `kind` for `source` at the next drain.
    ///
    /// Returns `false` if the same request is already pending.
    pub fn do_later(&mut self, kind: UpdateKind, source: K) -> bool {
        if !self.pending.insert((kind, source)) {
            return false;
        }
        self.order.push((kind, source));
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Returns `true` if `kind` is pending for `source`.
    #[must_use]
    pub fn is_pending(&self, kind: UpdateKind, source: K) -> bool {
        self.pending.contains(&(kind, source))
    }

    /// Number of pending requests.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drops every pending request from `source`, e.g. when it is destroyed.
    ///
    /// Returns how many requests were dropped.
    pub fn cancel_source(&mut self, source: K) -> usize {
        let before = self.order.len();
        self.order.retain(|(_, s)| *s != source);
        self.pending.retain(|(_, s)| *s != source);
        let removed = before - self.order.len();
        if removed > 0 {
            self.generation = self.generation.wrapping_add(1);
        }
        removed
    }

    /// Takes every pending request in first-request order.
    ///
    /// The queue is empty afterwards; requests made while the returned
    /// iterator is processed land in the next drain.
    pub fn drain(&mut self) -> alloc::vec::IntoIter<(UpdateKind, K)> {
        if !self.order.is_empty() {
            log::debug!("draining {} pending updates", self.order.len());
            self.generation = self.generation.wrapping_add(1);
        }
        self.pending.clear();
        core::mem::take(&mut self.order).into_iter()
    }
}
