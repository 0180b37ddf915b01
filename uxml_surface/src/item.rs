// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display items and the append-only display list.

use alloc::vec::Vec;
use kurbo::{BezPath, Ellipse, Line, Rect, RoundedRect, Shape, Stroke};
use peniko::{Brush, Color};

/// Stroke style and the brush it is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    /// Brush used for the outline.
    pub brush: Brush,
    /// Width, joins, caps and dashes.
    pub stroke: Stroke,
}

impl Pen {
    /// A solid pen of the given width.
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            brush: Brush::Solid(color),
            stroke: Stroke::new(width),
        }
    }
}

/// How a shape is painted: filled, outlined, or both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paint {
    /// Interior brush.
    pub fill: Option<Brush>,
    /// Outline.
    pub pen: Option<Pen>,
}

impl Paint {
    /// Fill only.
    #[must_use]
    pub fn fill(brush: impl Into<Brush>) -> Self {
        Self {
            fill: Some(brush.into()),
            pen: None,
        }
    }

    /// Outline only.
    #[must_use]
    pub fn stroke(pen: Pen) -> Self {
        Self {
            fill: None,
            pen: Some(pen),
        }
    }

    /// Adds an outline.
    #[must_use]
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = Some(pen);
        self
    }

    fn half_width(&self) -> f64 {
        self.pen.as_ref().map_or(0.0, |p| p.stroke.width * 0.5)
    }
}

/// One render primitive, in the owning surface's local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayItem {
    /// Axis-aligned rectangle.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill and outline.
        paint: Paint,
    },
    /// Rectangle with rounded corners.
    RoundedRect {
        /// Geometry.
        rect: RoundedRect,
        /// Fill and outline.
        paint: Paint,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Geometry.
        ellipse: Ellipse,
        /// Fill and outline.
        paint: Paint,
    },
    /// Arbitrary Bezier path.
    Path {
        /// Geometry.
        path: BezPath,
        /// Fill and outline.
        paint: Paint,
    },
    /// Straight segment; only ever stroked.
    Line {
        /// Geometry.
        line: Line,
        /// Outline.
        pen: Pen,
    },
}

impl DisplayItem {
    /// Bounds of the painted area, including half the stroke width.
    ///
    /// Returns `None` for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let (geometry, half) = match self {
            Self::Rect { rect, paint } => (*rect, paint.half_width()),
            Self::RoundedRect { rect, paint } => (rect.rect(), paint.half_width()),
            Self::Ellipse { ellipse, paint } => (ellipse.bounding_box(), paint.half_width()),
            Self::Path { path, paint } => (uxml_geometry::path_bounds(path)?, paint.half_width()),
            Self::Line { line, pen } => (
                Rect::from_points(line.p0, line.p1),
                pen.stroke.width * 0.5,
            ),
        };
        Some(geometry.inflate(half, half))
    }
}

/// Ordered render primitives of one surface.
///
/// Items are only appended; [`DisplayList::clear`] is the one way to drop
/// them, typically right before the owner re-records its content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
}

impl DisplayList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends an item.
    pub fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    /// Appends a rectangle.
    pub fn rect(&mut self, rect: Rect, paint: Paint) {
        self.push(DisplayItem::Rect { rect, paint });
    }

    /// Appends a rounded rectangle.
    pub fn rounded_rect(&mut self, rect: RoundedRect, paint: Paint) {
        self.push(DisplayItem::RoundedRect { rect, paint });
    }

    /// Appends an ellipse.
    pub fn ellipse(&mut self, ellipse: Ellipse, paint: Paint) {
        self.push(DisplayItem::Ellipse { ellipse, paint });
    }

    /// Appends a path.
    pub fn path(&mut self, path: BezPath, paint: Paint) {
        self.push(DisplayItem::Path { path, paint });
    }

    /// Appends a line.
    pub fn line(&mut self, line: Line, pen: Pen) {
        self.push(DisplayItem::Line { line, pen });
    }

    /// Drops every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in paint order.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Union of the item bounds, or `None` if nothing paints.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .filter_map(DisplayItem::bounds)
            .reduce(|a, b| a.union(b))
    }
}
