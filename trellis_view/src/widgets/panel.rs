// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Children stacked on top of each other.

use kurbo::{Point, Size};
use trellis_layout::{Alignment, DirtyTracker, DirtyTrackingList, Direction, LayoutParameters};

use crate::child::{FocusSearchResult, ViewChild};
use crate::widget::{LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// Overlapping children, each aligned independently within the content box.
///
/// The content size fits the largest child. Children with a stretched axis
/// are measured after the others and stretch to that size instead of the full
/// available space; their minimum sizes count towards it.
#[derive(Debug)]
pub struct Panel {
    children: DirtyTrackingList<ViewId>,
    horizontal_content_alignment: DirtyTracker<Alignment>,
    vertical_content_alignment: DirtyTracker<Alignment>,
    positions: Vec<ViewChild>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    /// Empty panel.
    pub fn new() -> Self {
        Self {
            children: DirtyTrackingList::new(),
            horizontal_content_alignment: DirtyTracker::new(Alignment::Start),
            vertical_content_alignment: DirtyTracker::new(Alignment::Start),
            positions: Vec::new(),
        }
    }

    /// Panel holding `children`, back to front for equal z-index.
    pub fn with_children(children: impl IntoIterator<Item = ViewId>) -> Self {
        Self {
            children: children.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Panel that positions a single child by alignment.
    ///
    /// The panel itself fills the available space; set its layout to
    /// [`LayoutParameters::fill`].
    pub fn align(content: ViewId, horizontal: Alignment, vertical: Alignment) -> Self {
        let mut panel = Self::with_children([content]);
        panel.set_horizontal_content_alignment(horizontal);
        panel.set_vertical_content_alignment(vertical);
        panel
    }

    /// Children in insertion order.
    pub fn child_views(&self) -> &[ViewId] {
        &self.children
    }

    /// Replace the children. Returns whether the list changed.
    pub fn set_children(&mut self, children: impl IntoIterator<Item = ViewId>) -> bool {
        self.children.set_items(children)
    }

    /// Append a child.
    pub fn push_child(&mut self, child: ViewId) {
        self.children.push(child);
    }

    /// Remove a child from the panel. Returns whether it was present.
    pub fn remove_child(&mut self, child: ViewId) -> bool {
        self.children.remove(&child)
    }

    /// Horizontal placement of each child.
    pub fn horizontal_content_alignment(&self) -> Alignment {
        *self.horizontal_content_alignment
    }

    /// Set the horizontal placement of each child.
    pub fn set_horizontal_content_alignment(&mut self, alignment: Alignment) {
        self.horizontal_content_alignment.set(alignment);
    }

    /// Vertical placement of each child.
    pub fn vertical_content_alignment(&self) -> Alignment {
        *self.vertical_content_alignment
    }

    /// Set the vertical placement of each child.
    pub fn set_vertical_content_alignment(&mut self, alignment: Alignment) {
        self.vertical_content_alignment.set(alignment);
    }
}

fn max_size(a: Size, b: Size) -> Size {
    Size::new(a.width.max(b.width), a.height.max(b.height))
}

impl Widget for Panel {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout: LayoutParameters = cx.layout();
        let limits = layout.limits(available);
        let children: Vec<ViewId> = self
            .children
            .iter()
            .copied()
            .filter(|&child| cx.is_alive(child))
            .collect();

        let mut deferred = Vec::new();
        let mut max_child_size = Size::ZERO;
        for &child in &children {
            let child_layout = cx.layout_of(child);
            if child_layout.width.is_stretch() || child_layout.height.is_stretch() {
                // Minimum sizes of stretched children still shape the panel.
                max_child_size = max_size(
                    max_child_size,
                    Size::new(
                        child_layout.min_width.unwrap_or(0.0),
                        child_layout.min_height.unwrap_or(0.0),
                    ),
                );
                deferred.push(child);
                continue;
            }
            cx.measure(child, limits);
            max_child_size = max_size(max_child_size, cx.outer_size(child));
        }

        let deferred_limits = if max_child_size == Size::ZERO {
            limits
        } else {
            let fitted = max_child_size;
            layout.resolve(available, || fitted)
        };
        for child in deferred {
            cx.measure(child, deferred_limits);
            max_child_size = max_size(max_child_size, cx.outer_size(child));
        }

        let content_size = layout.resolve(available, || max_child_size);
        let horizontal = *self.horizontal_content_alignment;
        let vertical = *self.vertical_content_alignment;
        self.positions.clear();
        for child in children {
            let outer = cx.outer_size(child);
            let position = Point::new(
                horizontal.align(outer.width, content_size.width),
                vertical.align(outer.height, content_size.height),
            );
            self.positions.push(ViewChild::new(child, position));
        }
        content_size
    }

    fn children(&self) -> &[ViewChild] {
        &self.positions
    }

    fn owned_views(&self) -> Vec<ViewId> {
        self.children.to_vec()
    }

    fn is_content_dirty(&self, tree: &ViewTree) -> bool {
        self.horizontal_content_alignment.is_dirty()
            || self.vertical_content_alignment.is_dirty()
            || self.children.is_dirty()
            || self.children.iter().any(|&child| tree.is_dirty(child))
    }

    fn reset_dirty(&mut self) {
        self.horizontal_content_alignment.reset_dirty();
        self.vertical_content_alignment.reset_dirty();
        self.children.reset_dirty();
    }

    fn find_focusable_descendant(
        &self,
        tree: &ViewTree,
        position: Point,
        direction: Direction,
    ) -> Option<FocusSearchResult> {
        // Any child in the search direction may take focus, but the one under
        // the cursor goes first, then the frontmost. The sort is stable, so
        // ties keep insertion order.
        let mut candidates: Vec<(bool, i32, ViewChild)> = self
            .positions
            .iter()
            .map(|child| {
                (
                    child.contains_point(tree, position),
                    tree.z_index(child.view),
                    *child,
                )
            })
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        candidates
            .into_iter()
            .map(|(_, _, child)| child)
            .filter(|child| child.is_in_direction(tree, position, direction))
            .find_map(|child| {
                #[cfg(feature = "tracing")]
                tracing::debug!(candidate = tree.name(child.view), "panel candidate");
                child.focus_search(tree, position, direction)
            })
    }
}
