// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving effects from property-change notifications.

use alloc::rc::Rc;
use alloc::string::ToString;
use core::cell::RefCell;

use uxml_effect::Effect;
use uxml_element::{ElementArgs, ElementError, ElementHandler, ElementId, ElementTree, PropertyChangedArgs};
use uxml_event::{HandlerError, handler};

/// Applies `effect` to `control` and keeps it in step with its trigger.
///
/// A `PropertyChanged` listener is added to the control and, when the trigger
/// watches a named part, to that part as well. The effect is evaluated once
/// immediately so a trigger that already holds takes effect.
///
/// The part is resolved now. After replacing the control's chrome, call
/// [`rebind_effect`] with the returned listener to follow the new part.
///
/// Writes made by the effect's own actions notify re-entrantly while the
/// effect is borrowed; those notifications are skipped.
///
/// Returns the listener so it can be removed again.
pub fn bind_effect(
    tree: &mut ElementTree,
    control: ElementId,
    effect: Rc<RefCell<Effect>>,
) -> Result<ElementHandler<PropertyChangedArgs>, ElementError> {
    let event = tree.registries().property_changed();
    let inner = Rc::clone(&effect);
    let listener: ElementHandler<PropertyChangedArgs> = handler(
        move |tree: &mut ElementTree, args: &mut ElementArgs<PropertyChangedArgs>| {
            let Ok(mut effect) = inner.try_borrow_mut() else {
                return Ok(());
            };
            effect
                .on_property_changed(tree, control, args.source, &args.payload.change)
                .map(|_| ())
                .map_err(|e| HandlerError::new(e.to_string()))
        },
    );
    tree.add_handler(control, event, Rc::clone(&listener))?;
    rebind_effect(tree, control, &effect, &listener)?;
    Ok(listener)
}

/// Attaches `listener` to the part `effect` currently watches and
/// re-evaluates the effect.
///
/// Changes on a part that is no longer the trigger source are ignored by the
/// effect, so listeners left on old parts are harmless. Returns `true` if the
/// effect was applied or unapplied.
pub fn rebind_effect(
    tree: &mut ElementTree,
    control: ElementId,
    effect: &RefCell<Effect>,
    listener: &ElementHandler<PropertyChangedArgs>,
) -> Result<bool, ElementError> {
    let event = tree.registries().property_changed();
    let source = effect.borrow().source(tree, control);
    if let Some(source) = source
        && source != control
    {
        tree.add_handler(source, event, Rc::clone(listener))?;
    }
    effect.borrow_mut().evaluate(tree, control)
}
