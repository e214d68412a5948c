// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Widget`] capability trait and the contexts passed to its hooks.
//!
//! A view is a [`ViewCore`](crate::ViewCore) (layout, edges, flags, floats)
//! owned by the [`ViewTree`], plus a boxed [`Widget`] that supplies the
//! type-specific behavior: how content is measured and drawn, which children
//! exist and where, and how focus moves between them. Everything else
//! (dirty checking, edge composition, hit testing, event routing) is shared and
//! lives on the tree.

use core::any::Any;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Size, Vec2};
use smallvec::SmallVec;
use trellis_layout::{Direction, Edges, LayoutParameters};

use crate::child::{FocusSearchResult, ViewChild};
use crate::surface::Surface;
use crate::{ViewId, ViewTree};

/// Children returned by hit-testing queries. Rarely more than a couple.
pub type ChildList = SmallVec<[ViewChild; 4]>;

/// Type-specific behavior of a view.
///
/// All positions passed to and returned from these hooks are in the view's
/// *content* coordinate space, i.e. after margin, border, padding and
/// [`Widget::layout_offset`] have been removed.
pub trait Widget: Any + fmt::Debug {
    /// Measure content given the space left inside margin, border and padding.
    ///
    /// Containers measure their children through `cx` and record the child
    /// positions they will report from [`Widget::children`]. Returns the new
    /// content size.
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size;

    /// Draw the content. The surface origin is the content origin.
    ///
    /// The default draws [`Widget::children`] in ascending z-index order.
    fn draw_content(&self, cx: &mut DrawCx<'_>) {
        cx.draw_children(self.children());
    }

    /// Draw the border (or background). The surface origin is the border origin.
    fn draw_border(&self, _cx: &mut DrawCx<'_>) {}

    /// Thickness of the border drawn by [`Widget::draw_border`].
    fn border_thickness(&self) -> Edges {
        Edges::NONE
    }

    /// Extra translation applied to content, e.g. a scroll offset.
    fn layout_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Laid-out children with their positions in content space.
    fn children(&self) -> &[ViewChild] {
        &[]
    }

    /// Every view this widget owns, whether or not it has been laid out.
    ///
    /// Used when removing a subtree. Defaults to the views of [`Widget::children`].
    fn owned_views(&self) -> Vec<ViewId> {
        self.children().iter().map(|child| child.view).collect()
    }

    /// Children that contain `position`, front to back.
    ///
    /// The default checks every child from [`Widget::children`] and orders
    /// matches by descending z-index, keeping layout order among equal z.
    fn children_at(&self, tree: &ViewTree, position: Point) -> ChildList {
        let mut hits: ChildList = self
            .children()
            .iter()
            .filter(|child| child.contains_point(tree, position))
            .copied()
            .collect();
        hits.sort_by_key(|child| core::cmp::Reverse(tree.z_index(child.view)));
        hits
    }

    /// Find a focusable descendant from `position` moving in `direction`.
    fn find_focusable_descendant(
        &self,
        _tree: &ViewTree,
        _position: Point,
        _direction: Direction,
    ) -> Option<FocusSearchResult> {
        None
    }

    /// Whether widget-specific state (including children) needs a new layout.
    fn is_content_dirty(&self, _tree: &ViewTree) -> bool {
        false
    }

    /// Clear widget-specific dirty flags after a layout pass.
    fn reset_dirty(&mut self) {}

    /// Bring the end of `path` into view. `path` starts below this view.
    ///
    /// The default forwards to the first element of `path`. Returns the
    /// distance scrolled, if anything scrolled.
    fn scroll_into_view(
        &mut self,
        tree: &mut ViewTree,
        _this: ViewId,
        path: &[ViewChild],
    ) -> Option<Vec2> {
        let (first, rest) = path.split_first()?;
        tree.scroll_into_view(first.view, rest)
    }

    /// Per-frame hook, called before the update recurses into children.
    fn update(&mut self, _tree: &mut ViewTree, _this: ViewId, _elapsed: Duration) {}
}

/// Access to the tree while a widget measures its content.
///
/// The measuring widget is checked out of the tree for the duration, so it must
/// only reach other views (its children) through this context.
pub struct LayoutCx<'a> {
    pub(crate) tree: &'a mut ViewTree,
    pub(crate) view: ViewId,
}

impl fmt::Debug for LayoutCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCx")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl LayoutCx<'_> {
    /// The view being measured.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Layout parameters of the view being measured.
    pub fn layout(&self) -> LayoutParameters {
        self.tree.layout(self.view)
    }

    /// Read-only access to the whole tree.
    pub fn tree(&self) -> &ViewTree {
        self.tree
    }

    /// Mutable access to the whole tree.
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        self.tree
    }

    /// Measure `child` with `available` space. Returns whether it re-laid out.
    pub fn measure(&mut self, child: ViewId, available: Size) -> bool {
        self.tree.measure(child, available)
    }

    /// Outer size of `child` as of its last measure.
    pub fn outer_size(&self, child: ViewId) -> Size {
        self.tree.outer_size(child)
    }

    /// Layout parameters of `child`.
    pub fn layout_of(&self, child: ViewId) -> LayoutParameters {
        self.tree.layout(child)
    }

    /// Whether `child` is still alive.
    pub fn is_alive(&self, child: ViewId) -> bool {
        self.tree.is_alive(child)
    }
}

/// Access to the tree and surface while a widget draws.
pub struct DrawCx<'a> {
    pub(crate) tree: &'a ViewTree,
    pub(crate) surface: &'a mut dyn Surface,
    pub(crate) view: ViewId,
}

impl fmt::Debug for DrawCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCx")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl DrawCx<'_> {
    /// The view being drawn.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Read-only access to the whole tree.
    pub fn tree(&self) -> &ViewTree {
        self.tree
    }

    /// The draw target.
    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Content size of the view being drawn.
    pub fn content_size(&self) -> Size {
        self.tree.content_size(self.view)
    }

    /// Outer size of the view being drawn.
    pub fn outer_size(&self) -> Size {
        self.tree.outer_size(self.view)
    }

    /// Draw a single child at its position, isolating its transform changes.
    pub fn draw_child(&mut self, child: ViewChild) {
        self.surface.save();
        self.surface.translate(child.position.to_vec2());
        self.tree.draw(child.view, &mut *self.surface);
        self.surface.restore();
    }

    /// Draw `children` in ascending z-index order (stable for equal z).
    pub fn draw_children(&mut self, children: &[ViewChild]) {
        let mut ordered: ChildList = children.iter().copied().collect();
        ordered.sort_by_key(|child| self.tree.z_index(child.view));
        for child in ordered {
            self.draw_child(child);
        }
    }
}
