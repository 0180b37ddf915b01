// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing target a surface tree paints into.

use alloc::vec::Vec;
use kurbo::{Affine, Vec2};

use crate::item::DisplayItem;

/// A host drawing backend.
///
/// Painting only ever needs a translation stack and a way to draw one
/// [`DisplayItem`] at the current origin. Calls to [`Canvas::save`] and
/// [`Canvas::restore`] are always balanced by [`SurfaceTree::paint`].
///
/// [`SurfaceTree::paint`]: crate::SurfaceTree::paint
pub trait Canvas {
    /// Pushes the current transform.
    fn save(&mut self);
    /// Pops back to the last saved transform.
    fn restore(&mut self);
    /// Moves the origin by `offset`.
    fn translate(&mut self, offset: Vec2);
    /// Draws `item` under the current transform.
    fn draw(&mut self, item: &DisplayItem);
}

/// Operation recorded by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    /// [`Canvas::save`].
    Save,
    /// [`Canvas::restore`].
    Restore,
    /// [`Canvas::translate`].
    Translate(Vec2),
    /// [`Canvas::draw`], with the transform in effect.
    Draw {
        /// The item as drawn.
        item: DisplayItem,
        /// Transform at the time of drawing.
        transform: Affine,
    },
}

/// A canvas that records what it is asked to do.
///
/// It does not rasterize; it exists for tests and for debugging paint order.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<CanvasOp>,
    transform: Affine,
    stack: Vec<Affine>,
}

impl RecordingCanvas {
    /// An empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations in order.
    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Only the draws, with the transform each was drawn under.
    pub fn draws(&self) -> impl Iterator<Item = (&DisplayItem, Affine)> {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::Draw { item, transform } => Some((item, *transform)),
            _ => None,
        })
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Current depth of the save stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Forgets recorded operations and resets the transform.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.stack.clear();
        self.transform = Affine::IDENTITY;
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.transform);
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(t) => self.transform = t,
            None => log::warn!("RecordingCanvas: restore without matching save"),
        }
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
        self.ops.push(CanvasOp::Translate(offset));
    }

    fn draw(&mut self, item: &DisplayItem) {
        self.ops.push(CanvasOp::Draw {
            item: item.clone(),
            transform: self.transform,
        });
    }
}
