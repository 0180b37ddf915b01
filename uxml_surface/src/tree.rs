// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface tree: layout rects, display lists, hit testing and paint.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::canvas::Canvas;
use crate::item::DisplayList;
use crate::types::{SurfaceError, SurfaceFlags, SurfaceId};

#[derive(Debug)]
struct Surface<K> {
    parent: Option<SurfaceId>,
    children: Vec<SurfaceId>,
    rect: Rect,
    key: Option<K>,
    flags: SurfaceFlags,
    list: DisplayList,
}

impl<K> Surface<K> {
    fn new(parent: Option<SurfaceId>, key: Option<K>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            rect: Rect::ZERO,
            key,
            flags: SurfaceFlags::default(),
            list: DisplayList::new(),
        }
    }
}

#[derive(Debug)]
struct Slot<K> {
    generation: u32,
    surface: Option<Surface<K>>,
}

/// A tree of surfaces, each with a layout rect and a display list.
///
/// A surface's layout rect is expressed in its parent's coordinate space and
/// its display list in its own, so the origin of the rect is the offset
/// applied to everything below it. A surface owns its children: removing it
/// removes its whole subtree.
///
/// `K` is the key of the element a surface presents, if any; hit tests
/// report surfaces and callers map them back through [`SurfaceTree::key`].
///
/// ```
/// use kurbo::{Point, Rect};
/// use uxml_surface::SurfaceTree;
///
/// let mut tree = SurfaceTree::<u32>::new(Rect::new(0.0, 0.0, 100.0, 100.0));
/// let root = tree.root();
/// let s1 = tree.create_surface(root, Some(1)).unwrap();
/// let s2 = tree.create_surface(root, Some(2)).unwrap();
/// tree.set_layout_rect(s1, Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
/// tree.set_layout_rect(s2, Rect::new(25.0, 25.0, 75.0, 75.0)).unwrap();
///
/// // Siblings are tested last-added first.
/// assert_eq!(tree.hit_test(root, Point::new(30.0, 30.0)), Some(s2));
/// assert_eq!(tree.hit_test(root, Point::new(90.0, 10.0)), Some(root));
/// ```
#[derive(Debug)]
pub struct SurfaceTree<K> {
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    root: SurfaceId,
}

impl<K: Copy> SurfaceTree<K> {
    /// A tree holding only a root surface with the given rect.
    #[must_use]
    pub fn new(root_rect: Rect) -> Self {
        let root = SurfaceId::new(0, 1);
        let mut surface = Surface::new(None, None);
        surface.rect = root_rect;
        Self {
            slots: alloc::vec![Slot {
                generation: 1,
                surface: Some(surface),
            }],
            free: Vec::new(),
            root,
        }
    }

    /// The root surface.
    #[must_use]
    pub fn root(&self) -> SurfaceId {
        self.root
    }

    /// Returns `true` if `id` refers to a live surface.
    #[must_use]
    pub fn is_alive(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    fn get(&self, id: SurfaceId) -> Option<&Surface<K>> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.surface.as_ref())
    }

    fn get_mut(&mut self, id: SurfaceId) -> Result<&mut Surface<K>, SurfaceError> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.surface.as_mut())
            .ok_or(SurfaceError::Stale(id))
    }

    /// Creates a surface as the front-most child of `parent`.
    ///
    /// The new surface starts with an empty rect; it neither paints nor hits
    /// until [`set_layout_rect`](Self::set_layout_rect) sizes it.
    pub fn create_surface(
        &mut self,
        parent: SurfaceId,
        key: Option<K>,
    ) -> Result<SurfaceId, SurfaceError> {
        self.get_mut(parent)?;
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            SurfaceId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len())
                .unwrap_or_else(|_| panic!("surface arena full"));
            self.slots.push(Slot {
                generation: 1,
                surface: None,
            });
            SurfaceId::new(idx, 1)
        };
        self.slots[id.idx()].surface = Some(Surface::new(Some(parent), key));
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Removes `id` and its subtree; returns how many surfaces were removed.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Result<usize, SurfaceError> {
        if id == self.root {
            return Err(SurfaceError::RemoveRoot);
        }
        let parent = self.get_mut(id)?.parent;
        if let Some(parent) = parent
            && let Ok(p) = self.get_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        let mut stack: SmallVec<[SurfaceId; 16]> = SmallVec::new();
        stack.push(id);
        let mut removed = 0;
        while let Some(s) = stack.pop() {
            let slot = &mut self.slots[s.idx()];
            if slot.generation != s.generation() {
                continue;
            }
            let Some(surface) = slot.surface.take() else {
                continue;
            };
            stack.extend(surface.children);
            #[expect(clippy::cast_possible_truncation, reason = "slot indices fit in u32")]
            let idx = s.idx() as u32;
            self.free.push(idx);
            removed += 1;
        }
        log::debug!("removed {removed} surfaces rooted at {id:?}");
        Ok(removed)
    }

    /// Moves `id` with its subtree to the front of `parent`'s children.
    ///
    /// The layout rect is kept, so it is read in the new parent's space.
    pub fn reparent_surface(&mut self, id: SurfaceId, parent: SurfaceId) -> Result<(), SurfaceError> {
        let old_parent = self.get_mut(id)?.parent;
        self.get_mut(parent)?;
        let mut cur = Some(parent);
        while let Some(c) = cur {
            if c == id {
                return Err(SurfaceError::Cycle { surface: id, parent });
            }
            cur = self.parent(c);
        }
        if let Some(old) = old_parent
            && let Ok(p) = self.get_mut(old)
        {
            p.children.retain(|c| *c != id);
        }
        self.get_mut(parent)?.children.push(id);
        self.get_mut(id)?.parent = Some(parent);
        Ok(())
    }

    /// Parent of `id`; `None` for the root or a stale handle.
    #[must_use]
    pub fn parent(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.get(id).and_then(|s| s.parent)
    }

    /// Children of `id`, back to front.
    #[must_use]
    pub fn children(&self, id: SurfaceId) -> &[SurfaceId] {
        self.get(id).map_or(&[][..], |s| s.children.as_slice())
    }

    /// Key of the element `id` presents.
    #[must_use]
    pub fn key(&self, id: SurfaceId) -> Option<K> {
        self.get(id).and_then(|s| s.key)
    }

    /// Layout rect of `id` in its parent's space.
    #[must_use]
    pub fn layout_rect(&self, id: SurfaceId) -> Option<Rect> {
        self.get(id).map(|s| s.rect)
    }

    /// Sets the layout rect of `id`, in its parent's space.
    pub fn set_layout_rect(&mut self, id: SurfaceId, rect: Rect) -> Result<(), SurfaceError> {
        self.get_mut(id)?.rect = rect;
        Ok(())
    }

    /// Flags of `id`.
    #[must_use]
    pub fn flags(&self, id: SurfaceId) -> Option<SurfaceFlags> {
        self.get(id).map(|s| s.flags)
    }

    /// Replaces the flags of `id`.
    pub fn set_flags(&mut self, id: SurfaceId, flags: SurfaceFlags) -> Result<(), SurfaceError> {
        self.get_mut(id)?.flags = flags;
        Ok(())
    }

    /// Display list of `id`.
    #[must_use]
    pub fn display_list(&self, id: SurfaceId) -> Option<&DisplayList> {
        self.get(id).map(|s| &s.list)
    }

    /// Mutable display list of `id`, for recording.
    pub fn display_list_mut(&mut self, id: SurfaceId) -> Result<&mut DisplayList, SurfaceError> {
        Ok(&mut self.get_mut(id)?.list)
    }

    /// Converts a point in the root's parent space into `id`'s local space.
    #[must_use]
    pub fn to_local(&self, id: SurfaceId, point: Point) -> Option<Point> {
        let mut offset = Vec2::ZERO;
        let mut cur = Some(id);
        while let Some(s) = cur {
            let surface = self.get(s)?;
            offset += surface.rect.origin().to_vec2();
            cur = surface.parent;
        }
        Some(point - offset)
    }

    /// Finds the front-most surface under `point`, given in `surface`'s
    /// local space.
    ///
    /// Children are tried last-added first, each in its own local space, and
    /// the first hit wins. When no child is hit, `surface` itself is the
    /// target if the point lies within its bounds. The root is always a
    /// fallback: a test that starts at the root never misses. Surfaces that
    /// are invisible or unpickable are skipped along with their subtrees.
    ///
    /// Returns `None` for a stale handle or a miss below the root.
    #[must_use]
    pub fn hit_test(&self, surface: SurfaceId, point: Point) -> Option<SurfaceId> {
        let s = self.get(surface)?;
        let hit = self.hit_children(s, point).or_else(|| {
            Rect::from_origin_size(Point::ORIGIN, s.rect.size())
                .contains(point)
                .then_some(surface)
        });
        if surface == self.root {
            Some(hit.unwrap_or(surface))
        } else {
            hit
        }
    }

    fn hit_children(&self, s: &Surface<K>, point: Point) -> Option<SurfaceId> {
        s.children.iter().rev().find_map(|&child| {
            let c = self.get(child)?;
            if !c.flags.contains(SurfaceFlags::VISIBLE | SurfaceFlags::PICKABLE)
                || !c.rect.contains(point)
            {
                return None;
            }
            let local = point - c.rect.origin().to_vec2();
            self.hit_children(c, local).or(Some(child))
        })
    }

    /// Repaints the whole tree into `canvas`.
    ///
    /// Surfaces are visited in addition order. Each one saves the canvas,
    /// translates to its layout origin, draws its own list, paints its
    /// children and restores. Invisible surfaces skip their whole subtree.
    pub fn paint(&self, canvas: &mut impl Canvas) {
        self.paint_surface(self.root, canvas);
    }

    fn paint_surface(&self, id: SurfaceId, canvas: &mut impl Canvas) {
        let Some(s) = self.get(id) else {
            return;
        };
        if !s.flags.contains(SurfaceFlags::VISIBLE) {
            return;
        }
        canvas.save();
        canvas.translate(s.rect.origin().to_vec2());
        for item in s.list.items() {
            canvas.draw(item);
        }
        for &child in &s.children {
            self.paint_surface(child, canvas);
        }
        canvas.restore();
    }
}
