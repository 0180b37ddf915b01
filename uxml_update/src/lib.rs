// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Update: deferred work, collapsed per source.
//!
//! Property writes and structural changes do not re-layout or repaint
//! immediately. Instead they record an [`UpdateKind`] for the affected
//! element in an [`UpdateQueue`]; the host drains the queue once per frame.
//!
//! Requests for the same (kind, source) pair made before the next drain
//! collapse into one entry, and entries are yielded in the order they were
//! first requested.
//!
//! ```rust
//! use uxml_update::{UpdateKind, UpdateQueue};
//!
//! let mut queue = UpdateQueue::<u32>::new();
//! assert!(queue.do_later(UpdateKind::LAYOUT, 1));
//! assert!(queue.do_later(UpdateKind::RENDER, 1));
//! assert!(!queue.do_later(UpdateKind::LAYOUT, 1)); // collapsed
//!
//! let work: Vec<_> = queue.drain().collect();
//! assert_eq!(work, [(UpdateKind::LAYOUT, 1), (UpdateKind::RENDER, 1)]);
//! assert!(queue.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod kind;
mod queue;

pub use kind::UpdateKind;
pub use queue::UpdateQueue;
