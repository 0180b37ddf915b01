// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View-state effects bound through `PropertyChanged`.

use std::cell::RefCell;
use std::rc::Rc;

use peniko::Color;
use uxml::{
    Action, ActionState, Builtins, Effect, ElementId, ElementTree, Registries, Trigger,
    ViewState, bind_effect, rebind_effect,
};

struct Window {
    tree: ElementTree,
    b: Builtins,
    window: ElementId,
    title: ElementId,
    button: ElementId,
}

fn window() -> Window {
    let mut registries = Registries::new("UxmlElement");
    let b = Builtins::register(&mut registries);
    registries.seal();
    let mut tree = ElementTree::new(Rc::new(registries));

    let window = tree.create(b.control);
    let chrome = tree.create(b.panel);
    let title = tree.create_named(b.element, "title");
    let button = tree.create_named(b.control, "maximize");
    tree.add_child(chrome, title).unwrap();
    tree.add_child(chrome, button).unwrap();
    tree.set_chrome(window, Some(chrome)).unwrap();
    tree.set(window, b.width, 300.0).unwrap();
    Window {
        tree,
        b,
        window,
        title,
        button,
    }
}

#[test]
fn maximize_applies_and_normal_reverts() {
    let mut w = window();
    let b = w.b;
    let effect = Effect::new(Trigger::new(b.view_state, ViewState::Maximized))
        .with_action(Action::property(b.width, 1000.0))
        .with_action(Action::property(b.background, Some(Color::BLACK)).with_target("title"));
    let effect = Rc::new(RefCell::new(effect));
    bind_effect(&mut w.tree, w.window, Rc::clone(&effect)).unwrap();

    w.tree.set(w.window, b.view_state, ViewState::Maximized).unwrap();
    assert_eq!(w.tree.get(w.window, b.width), Ok(1000.0));
    assert_eq!(w.tree.get(w.title, b.background), Ok(Some(Color::BLACK)));

    w.tree.set(w.window, b.view_state, ViewState::Normal).unwrap();
    assert_eq!(w.tree.get(w.window, b.width), Ok(300.0));
    assert_eq!(w.tree.get_local(w.title, b.background), None);
    assert!(
        effect
            .borrow()
            .actions()
            .all(|a| a.state(w.window) == ActionState::Idle)
    );
}

#[test]
fn binding_evaluates_immediately() {
    let mut w = window();
    let b = w.b;
    w.tree.set(w.window, b.view_state, ViewState::Maximized).unwrap();
    let effect = Effect::new(Trigger::new(b.view_state, ViewState::Maximized))
        .with_action(Action::property(b.opacity, 0.25));
    let effect = Rc::new(RefCell::new(effect));
    bind_effect(&mut w.tree, w.window, Rc::clone(&effect)).unwrap();
    assert!(effect.borrow().is_applied(w.window));
    assert_eq!(w.tree.get(w.window, b.opacity), Ok(0.25));
}

#[test]
fn trigger_on_a_named_part() {
    let mut w = window();
    let b = w.b;
    let effect = Effect::new(
        Trigger::new(b.view_state, ViewState::Minimized).with_source("maximize"),
    )
    .with_action(Action::property(b.is_visible, false).with_target("title"));
    let effect = Rc::new(RefCell::new(effect));
    let listener = bind_effect(&mut w.tree, w.window, Rc::clone(&effect)).unwrap();

    // The window's own view state is not the trigger.
    w.tree.set(w.window, b.view_state, ViewState::Minimized).unwrap();
    assert_eq!(w.tree.get(w.title, b.is_visible), Ok(true));

    w.tree.set(w.button, b.view_state, ViewState::Minimized).unwrap();
    assert_eq!(w.tree.get(w.title, b.is_visible), Ok(false));

    let event = b.property_changed;
    assert_eq!(w.tree.remove_handler(w.button, event, &listener), Ok(true));
    w.tree.set(w.button, b.view_state, ViewState::Normal).unwrap();
    assert_eq!(w.tree.get(w.title, b.is_visible), Ok(false));
}

#[test]
fn missing_target_leaves_action_idle() {
    let mut w = window();
    let b = w.b;
    let effect = Effect::new(Trigger::new(b.view_state, ViewState::Maximized))
        .with_action(Action::property(b.opacity, 0.5).with_target("no-such-part"));
    let effect = Rc::new(RefCell::new(effect));
    bind_effect(&mut w.tree, w.window, Rc::clone(&effect)).unwrap();
    w.tree.set(w.window, b.view_state, ViewState::Maximized).unwrap();
    assert!(effect.borrow().is_applied(w.window));
    assert!(
        effect
            .borrow()
            .actions()
            .all(|a| a.state(w.window) == ActionState::Idle)
    );
}

#[test]
fn failed_action_rolls_back_the_started_ones() {
    let mut w = window();
    let b = w.b;
    let stray = w.tree.create(b.element);
    // `Content` belongs to content controls, so the second action fails.
    let mut effect = Effect::new(Trigger::new(b.view_state, ViewState::Maximized))
        .with_action(Action::property(b.width, 400.0))
        .with_action(Action::property(b.content, Some(stray)));
    w.tree.set(w.window, b.view_state, ViewState::Maximized).unwrap();

    assert!(effect.evaluate(&mut w.tree, w.window).is_err());
    assert!(!effect.is_applied(w.window));
    assert_eq!(w.tree.get(w.window, b.width), Ok(300.0));
    assert!(effect.actions().all(|a| a.state(w.window) == ActionState::Idle));

    w.tree.set(w.window, b.view_state, ViewState::Normal).unwrap();
    assert_eq!(effect.evaluate(&mut w.tree, w.window), Ok(false));
    assert_eq!(w.tree.get(w.window, b.width), Ok(300.0));
}

#[test]
fn rebinding_follows_a_replaced_chrome() {
    let mut w = window();
    let b = w.b;
    let effect = Effect::new(
        Trigger::new(b.view_state, ViewState::Minimized).with_source("maximize"),
    )
    .with_action(Action::property(b.opacity, 0.5));
    let effect = Rc::new(RefCell::new(effect));
    let listener = bind_effect(&mut w.tree, w.window, Rc::clone(&effect)).unwrap();

    let chrome = w.tree.create(b.panel);
    let button = w.tree.create_named(b.control, "maximize");
    w.tree.add_child(chrome, button).unwrap();
    w.tree.set_chrome(w.window, Some(chrome)).unwrap();

    // Not followed until rebound.
    w.tree.set(button, b.view_state, ViewState::Minimized).unwrap();
    assert_eq!(w.tree.get(w.window, b.opacity), Ok(1.0));

    assert_eq!(rebind_effect(&mut w.tree, w.window, &effect, &listener), Ok(true));
    assert_eq!(w.tree.get(w.window, b.opacity), Ok(0.5));

    // The old part is no longer the trigger.
    w.tree.set(w.button, b.view_state, ViewState::Minimized).unwrap();
    w.tree.set(w.button, b.view_state, ViewState::Normal).unwrap();
    assert_eq!(w.tree.get(w.window, b.opacity), Ok(0.5));

    w.tree.set(button, b.view_state, ViewState::Normal).unwrap();
    assert_eq!(w.tree.get(w.window, b.opacity), Ok(1.0));
    assert!(!effect.borrow().is_applied(w.window));
}
