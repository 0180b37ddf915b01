// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UXML Effect: declarative, reversible property changes.
//!
//! An [`Action`] writes one property on a control or on a named part of its
//! chrome, remembering what was there before so [`AnyAction::reverse`] can
//! restore it. Each action keeps an [`ActionData`] record per control, which
//! makes `start` and `reverse` idempotent:
//!
//! ```text
//! Idle --start--> Active --reverse--> Idle
//! ```
//!
//! An [`Effect`] groups actions under a [`Trigger`] such as
//! "`ViewState` equals `Maximized`" and applies or reverses them as the
//! trigger's property changes.
//!
//! [`ActionKind::Animate`] carries duration and delay for hosts that
//! interpolate; this crate applies the target value immediately.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod effect;
mod scope;

pub use action::{Action, ActionData, ActionKind, ActionState, AnyAction};
pub use effect::{Condition, Effect, Trigger};
