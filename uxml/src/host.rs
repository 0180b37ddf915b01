// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bridge between an element tree and a host view.

use alloc::rc::Rc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use uxml_element::{ElementError, ElementId, ElementTree, Registries};
use uxml_surface::{Canvas, Paint, SurfaceError, SurfaceFlags, SurfaceId, SurfaceTree};
use uxml_update::UpdateKind;

use crate::builtins::{Builtins, MouseArgs};

/// Host tuning knobs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Upper bound on drain passes per frame.
    ///
    /// Processing an update may request more updates; draining repeats until
    /// the queue is empty or this many passes ran. Leftovers wait for the
    /// next frame.
    pub max_drain_passes: usize,
    /// Raise `Click` when a touch is released over the element it went down on.
    pub click_on_release: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_drain_passes: 8,
            click_on_release: true,
        }
    }
}

/// Errors surfaced by [`Host`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// An element operation failed.
    #[error(transparent)]
    Element(#[from] ElementError),
    /// A surface operation failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Phase of a host touch or pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Contact started.
    Down,
    /// Contact moved.
    Move,
    /// Contact ended.
    Up,
    /// The host took the contact away.
    Cancel,
}

/// A touch or pointer event delivered by the host view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Phase.
    pub phase: TouchPhase,
    /// Position in host view coordinates.
    pub position: Point,
    /// Host pointer identifier.
    pub pointer_id: u32,
}

impl TouchEvent {
    /// A primary-pointer event.
    #[must_use]
    pub fn new(phase: TouchPhase, position: Point) -> Self {
        Self {
            phase,
            position,
            pointer_id: 0,
        }
    }
}

/// Work done by one [`Host::drain`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Passes over the queue.
    pub passes: usize,
    /// Layout updates applied.
    pub layouts: usize,
    /// Render updates applied.
    pub renders: usize,
    /// Other updates handed to registered hooks.
    pub custom: usize,
    /// Updates for elements without a live surface, or kinds without a hook.
    pub skipped: usize,
    /// `true` if work was left in the queue after the last allowed pass.
    pub overflowed: bool,
}

/// Callback for a host-defined [`UpdateKind`].
pub type UpdateHook = Rc<dyn Fn(&mut ElementTree, ElementId)>;

/// Owns an element tree and the surfaces presenting it.
///
/// The host view forwards its callbacks here:
///
/// - `on_measure` sizes the root surface,
/// - `on_draw` drains pending updates and repaints everything,
/// - `on_touch_event` hit tests and raises routed mouse events.
///
/// Layout is absolute: an element's surface takes its `Left`, `Top`,
/// `Width` and `Height` relative to the nearest ancestor that has a surface.
/// Rendering paints the element's `Background` at its `Opacity`; hidden
/// elements are neither painted nor hit.
pub struct Host {
    tree: ElementTree,
    builtins: Builtins,
    config: HostConfig,
    surfaces: SurfaceTree<ElementId>,
    by_element: HashMap<ElementId, SurfaceId>,
    root: ElementId,
    pressed: Option<ElementId>,
    hooks: HashMap<UpdateKind, UpdateHook>,
}

impl core::fmt::Debug for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Host")
            .field("tree", &self.tree)
            .field("builtins", &self.builtins)
            .field("config", &self.config)
            .field("surfaces", &self.surfaces)
            .field("by_element", &self.by_element)
            .field("root", &self.root)
            .field("pressed", &self.pressed)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Host {
    /// Creates a host with a root panel presented by the root surface.
    #[must_use]
    pub fn new(registries: Rc<Registries>, builtins: Builtins, config: HostConfig) -> Self {
        let mut tree = ElementTree::new(registries);
        let root = tree.create(builtins.panel);
        let surfaces = SurfaceTree::new(Rect::ZERO);
        let mut by_element = HashMap::new();
        by_element.insert(root, surfaces.root());
        Self {
            tree,
            builtins,
            config,
            surfaces,
            by_element,
            root,
            pressed: None,
            hooks: HashMap::new(),
        }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The element tree.
    #[must_use]
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// The element tree, mutably.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    /// The built-in handles.
    #[must_use]
    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The surface tree.
    #[must_use]
    pub fn surfaces(&self) -> &SurfaceTree<ElementId> {
        &self.surfaces
    }

    /// The surface presenting `element`, if it has one.
    #[must_use]
    pub fn surface_of(&self, element: ElementId) -> Option<SurfaceId> {
        self.by_element
            .get(&element)
            .copied()
            .filter(|s| self.surfaces.is_alive(*s))
    }

    /// Gives `element` a surface under its nearest presented ancestor.
    ///
    /// Surfaces are stacked in attachment order among siblings. Layout and
    /// render updates are queued so the next drain fills the surface in.
    /// Returns the existing surface if there is one.
    pub fn create_surface(&mut self, element: ElementId) -> Result<SurfaceId, HostError> {
        if let Some(s) = self.surface_of(element) {
            return Ok(s);
        }
        if !self.tree.is_alive(element) {
            return Err(ElementError::Stale(element).into());
        }
        let parent = self.presenting_parent(element);
        let surface = self.surfaces.create_surface(parent, Some(element))?;
        self.by_element.insert(element, surface);
        let updates = self.tree.updates_mut();
        updates.do_later(UpdateKind::LAYOUT, element);
        updates.do_later(UpdateKind::RENDER, element);
        Ok(surface)
    }

    /// Removes `element` with its subtree, and every surface presenting it.
    ///
    /// Surfaces of elements that were moved out of the subtree survive.
    pub fn remove_element(&mut self, element: ElementId) -> Result<usize, HostError> {
        self.sync_surfaces();
        let removed = self.tree.remove(element)?;
        let tree = &self.tree;
        let surfaces = &mut self.surfaces;
        let mut result = Ok(());
        self.by_element.retain(|e, s| {
            if tree.is_alive(*e) {
                return true;
            }
            // Already gone if an ancestor surface was removed first.
            if surfaces.is_alive(*s)
                && let Err(err) = surfaces.remove_surface(*s)
            {
                log::warn!("removing surface of {e}: {err}");
                result = Err(err);
            }
            false
        });
        if self.pressed.is_some_and(|p| !self.tree.is_alive(p)) {
            self.pressed = None;
        }
        result?;
        Ok(removed)
    }

    /// The surface `element` belongs under: that of its nearest presented
    /// ancestor, or the root surface.
    fn presenting_parent(&self, element: ElementId) -> SurfaceId {
        self.tree
            .ancestors(element)
            .skip(1)
            .find_map(|a| self.surface_of(a))
            .unwrap_or_else(|| self.surfaces.root())
    }

    /// Moves surfaces whose elements were reparented since the last sync.
    ///
    /// Moves are applied shallowest element first, so every target parent is
    /// already in place when a surface is moved under it.
    fn sync_surfaces(&mut self) {
        let mut moves: Vec<(usize, SurfaceId, SurfaceId)> = self
            .by_element
            .iter()
            .filter_map(|(&e, &s)| {
                if e == self.root || !self.tree.is_alive(e) || !self.surfaces.is_alive(s) {
                    return None;
                }
                let parent = self.presenting_parent(e);
                (self.surfaces.parent(s) != Some(parent))
                    .then(|| (self.tree.ancestors(e).count(), s, parent))
            })
            .collect();
        moves.sort_unstable_by_key(|(depth, ..)| *depth);
        for (_, surface, parent) in moves {
            if let Err(e) = self.surfaces.reparent_surface(surface, parent) {
                log::warn!("moving {surface:?} under {parent:?}: {e}");
            }
        }
    }

    /// Runs `hook` for every drained update of `kind`.
    ///
    /// Hooks for the built-in layout and render kinds are ignored.
    pub fn on_update(&mut self, kind: UpdateKind, hook: UpdateHook) {
        if kind == UpdateKind::LAYOUT || kind == UpdateKind::RENDER {
            log::warn!("hooks cannot replace {kind:?}");
            return;
        }
        self.hooks.insert(kind, hook);
    }

    /// Measures the root for the space the host offers.
    ///
    /// The root panel's `Width` and `Height` are honored when positive and
    /// smaller than what is available. The root surface is resized to the
    /// result.
    pub fn on_measure(&mut self, available_width: f64, available_height: f64) -> Size {
        let pick = |requested: f64, available: f64| {
            if requested > 0.0 {
                requested.min(available)
            } else {
                available
            }
        };
        let b = self.builtins;
        let width = self.tree.get(self.root, b.width).unwrap_or(0.0);
        let height = self.tree.get(self.root, b.height).unwrap_or(0.0);
        let size = Size::new(pick(width, available_width), pick(height, available_height));
        let root = self.surfaces.root();
        if let Err(e) = self
            .surfaces
            .set_layout_rect(root, Rect::from_origin_size(Point::ORIGIN, size))
        {
            log::warn!("sizing root surface: {e}");
        }
        size
    }

    /// Drains pending updates, then repaints every surface into `canvas`.
    pub fn on_draw(&mut self, canvas: &mut impl Canvas) -> DrainReport {
        let report = self.drain();
        self.surfaces.paint(canvas);
        report
    }

    /// Hit tests `event` and raises the matching routed mouse events.
    ///
    /// - `Down` raises `PreviewMouseDown` root to target, then `MouseDown`
    ///   from the target up unless the preview was handled.
    /// - `Move` raises `MouseMove`.
    /// - `Up` raises `MouseUp`, then `Click` on the target when it is the
    ///   element the contact went down on and the config allows it.
    /// - `Cancel` forgets the pressed element.
    ///
    /// Returns the target element. The root is the target when nothing else
    /// is hit.
    pub fn on_touch_event(&mut self, event: TouchEvent) -> Result<ElementId, HostError> {
        self.sync_surfaces();
        let (target, local) = self.hit(event.position);
        let args = MouseArgs {
            position: event.position,
            local,
            pointer_id: event.pointer_id,
        };
        let b = self.builtins;
        match event.phase {
            TouchPhase::Down => {
                self.pressed = Some(target);
                let preview = self.tree.raise(b.preview_mouse_down, target, args)?;
                if !preview.args.handled && self.tree.is_alive(target) {
                    self.tree.raise(b.mouse_down, target, args)?;
                }
            }
            TouchPhase::Move => {
                self.tree.raise(b.mouse_move, target, args)?;
            }
            TouchPhase::Up => {
                let pressed = self.pressed.take();
                self.tree.raise(b.mouse_up, target, args)?;
                if self.config.click_on_release
                    && pressed == Some(target)
                    && self.tree.is_alive(target)
                {
                    self.tree.raise(b.click, target, args)?;
                }
            }
            TouchPhase::Cancel => self.pressed = None,
        }
        Ok(target)
    }

    /// Resolves the element under `position`, with the point in its
    /// surface's local space.
    fn hit(&self, position: Point) -> (ElementId, Point) {
        let root = self.surfaces.root();
        let mut surface = self.surfaces.hit_test(root, position).unwrap_or(root);
        // A surface may outlive its element until the next removal sweep.
        loop {
            if let Some(e) = self.surfaces.key(surface).filter(|e| self.tree.is_alive(*e)) {
                let local = self.surfaces.to_local(surface, position).unwrap_or(position);
                return (e, local);
            }
            match self.surfaces.parent(surface) {
                Some(p) => surface = p,
                None => return (self.root, position),
            }
        }
    }

    /// Processes queued updates at the frame boundary.
    ///
    /// Surfaces first follow any elements that moved in the tree. Layout
    /// copies `Left`, `Top`, `Width` and `Height` into the element's surface
    /// rect. Render re-records the surface's display list from
    /// `Background` and `Opacity` and applies `IsVisible`. Other kinds go to
    /// hooks registered with [`on_update`](Self::on_update).
    pub fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        self.sync_surfaces();
        while !self.tree.updates().is_empty() {
            if report.passes == self.config.max_drain_passes {
                log::warn!(
                    "{} updates left after {} drain passes",
                    self.tree.updates().len(),
                    report.passes
                );
                report.overflowed = true;
                break;
            }
            report.passes += 1;
            let batch: Vec<_> = self.tree.updates_mut().drain().collect();
            for (i, &(kind, element)) in batch.iter().enumerate() {
                let applied = match kind {
                    UpdateKind::LAYOUT => self.layout(element).map(|resized| {
                        report.layouts += 1;
                        // The background is recorded at the surface size.
                        if resized && !batch[i + 1..].contains(&(UpdateKind::RENDER, element)) {
                            self.tree.updates_mut().do_later(UpdateKind::RENDER, element);
                        }
                    }),
                    UpdateKind::RENDER => self.render(element).inspect(|_| report.renders += 1),
                    _ => self.run_hook(kind, element).inspect(|_| report.custom += 1),
                };
                if applied.is_none() {
                    report.skipped += 1;
                }
            }
        }
        report
    }

    fn run_hook(&mut self, kind: UpdateKind, element: ElementId) -> Option<()> {
        let hook = Rc::clone(self.hooks.get(&kind)?);
        if !self.tree.is_alive(element) {
            return None;
        }
        hook(&mut self.tree, element);
        Some(())
    }

    /// Returns whether the surface changed size.
    fn layout(&mut self, element: ElementId) -> Option<bool> {
        let surface = self.surface_of(element)?;
        if surface == self.surfaces.root() {
            // Sized by `on_measure`.
            return Some(false);
        }
        let b = self.builtins;
        let get = |p| self.tree.get(element, p).ok();
        let (left, top) = (get(b.left)?, get(b.top)?);
        let (width, height) = (get(b.width)?, get(b.height)?);
        let rect = Rect::new(left, top, left + width.max(0.0), top + height.max(0.0));
        let old = self.surfaces.layout_rect(surface)?;
        self.surfaces.set_layout_rect(surface, rect).ok()?;
        Some(old.size() != rect.size())
    }

    fn render(&mut self, element: ElementId) -> Option<()> {
        let surface = self.surface_of(element)?;
        let b = self.builtins;
        let visible = self.tree.get(element, b.is_visible).ok()?;
        let background = self.tree.get(element, b.background).ok()?;
        let opacity = self.tree.get(element, b.opacity).ok()?;
        let size = self.surfaces.layout_rect(surface)?.size();

        let mut flags = self.surfaces.flags(surface)?;
        flags.set(SurfaceFlags::VISIBLE | SurfaceFlags::PICKABLE, visible);
        self.surfaces.set_flags(surface, flags).ok()?;

        let list = self.surfaces.display_list_mut(surface).ok()?;
        list.clear();
        if let Some(color) = background {
            #[expect(clippy::cast_possible_truncation, reason = "opacity is within [0, 1]")]
            let alpha = opacity as f32;
            list.rect(
                Rect::from_origin_size(Point::ORIGIN, size),
                Paint::fill(color.multiply_alpha(alpha)),
            );
        }
        Some(())
    }
}
