// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler type and invocation.

use alloc::rc::Rc;
use core::ops::AddAssign;

use crate::args::EventArgs;
use crate::error::HandlerError;

/// A shared event handler.
///
/// `C` is the context handed to every handler (usually the element tree),
/// `K` the element key and `A` the event payload. Handlers are compared by
/// pointer identity, so keep the `Rc` around to remove one later.
pub type Handler<C, K, A> = Rc<dyn Fn(&mut C, &mut EventArgs<K, A>) -> Result<(), HandlerError>>;

/// Wraps a closure as a [`Handler`].
pub fn handler<C, K, A, F>(f: F) -> Handler<C, K, A>
where
    F: Fn(&mut C, &mut EventArgs<K, A>) -> Result<(), HandlerError> + 'static,
{
    Rc::new(f)
}

/// Outcome counts of one dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that ran.
    pub invoked: usize,
    /// Handlers that returned an error.
    pub failures: usize,
}

impl AddAssign for DispatchReport {
    fn add_assign(&mut self, rhs: Self) {
        self.invoked += rhs.invoked;
        self.failures += rhs.failures;
    }
}

/// Runs `handlers` in order. Failures are logged and counted.
pub fn invoke_all<C, K, A>(
    handlers: &[Handler<C, K, A>],
    ctx: &mut C,
    args: &mut EventArgs<K, A>,
) -> DispatchReport
where
    K: Copy,
{
    let mut report = DispatchReport::default();
    for h in handlers {
        report.invoked += 1;
        if let Err(e) = h(ctx, args) {
            report.failures += 1;
            log::warn!("{e} (event {})", args.event());
        }
    }
    report
}
