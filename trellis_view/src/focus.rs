// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional focus search and child paths.
//!
//! Focus search answers "starting at this position, which focusable view is
//! next in this direction?". The position is usually the center of the
//! currently focused view, expressed in the coordinates of the view being
//! searched. Each container decides how to walk its own children (see
//! [`Widget::find_focusable_descendant`](crate::Widget::find_focusable_descendant));
//! the tree adds the behavior shared by every view:
//!
//! - Invisible views are never searched.
//! - Floating elements that already contain the position are searched first,
//!   so navigation inside an open float stays inside it.
//! - A focusable view matches itself only when the position is on the far
//!   side of it, so a focused view never re-selects itself when moving away.
//! - Floats are searched again last, which allows moving *into* a float.

use kurbo::{Point, Vec2};
use trellis_layout::Direction;

use crate::child::{FocusSearchResult, ViewChild};
use crate::{ViewId, ViewTree};

impl ViewTree {
    /// Find the next focusable view from `position` (relative to `id`'s layout
    /// origin) moving in `direction`.
    ///
    /// The result's path starts at `id`.
    pub fn focus_search(
        &self,
        id: ViewId,
        position: Point,
        direction: Direction,
    ) -> Option<FocusSearchResult> {
        let core = self.core(id)?;
        if !core.is_visible() {
            return None;
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("focus_search", view = core.name()).entered();

        for float in core.floating_elements() {
            let child = float.as_view_child();
            if !child.contains_point(self, position) {
                continue;
            }
            if let Some(found) = child.focus_search(self, position, direction) {
                return Some(found.as_child(id, Vec2::ZERO));
            }
        }

        let offset = self.content_offset(id);
        let content_position = position - offset;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            view = core.name(),
            ?content_position,
            ?direction,
            "starting focus search"
        );
        let found = self
            .widget_dyn(id)
            .and_then(|widget| widget.find_focusable_descendant(self, content_position, direction));
        if let Some(found) = found {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                view = core.name(),
                target = self.name(found.target.view),
                position = ?found.target.position,
                "found focusable descendant"
            );
            return Some(found.as_child(id, offset));
        }

        let outer = self.outer_size(id);
        let approaching = match direction {
            Direction::East => position.x < 0.0,
            Direction::West => position.x >= outer.width,
            Direction::South => position.y < 0.0,
            Direction::North => position.y >= outer.height,
        };
        if core.is_focusable() && approaching {
            #[cfg(feature = "tracing")]
            tracing::debug!(view = core.name(), "no focusable descendant; matched self");
            return Some(FocusSearchResult::new(ViewChild::new(id, Point::ZERO)));
        }

        for float in core.floating_elements() {
            if let Some(found) = float
                .as_view_child()
                .focus_search(self, position, direction)
            {
                return Some(found.as_child(id, Vec2::ZERO));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(view = core.name(), "no focusable descendant matched");
        None
    }

    /// The child that should receive focus when `id` is entered without a
    /// direction: the view itself if focusable, otherwise the first child that
    /// has a default focus child of its own.
    pub fn default_focus_child(&self, id: ViewId) -> Option<ViewChild> {
        let core = self.core(id)?;
        if core.is_focusable() {
            return Some(ViewChild::new(id, Point::ZERO));
        }
        self.children(id)
            .into_iter()
            .find(|child| self.default_focus_child(child.view).is_some())
    }

    /// Chain of default focus children from `id` down to a focusable view.
    ///
    /// Empty when nothing in the subtree can take focus.
    pub fn default_focus_path(&self, id: ViewId) -> Vec<ViewChild> {
        let mut path = Vec::new();
        let Some(mut current) = self.default_focus_child(id) else {
            return path;
        };
        loop {
            path.push(current);
            match self.default_focus_child(current.view) {
                Some(next) if next.view != current.view => current = next,
                _ => break,
            }
        }
        path
    }

    /// Chain of views under `position`, starting with `id` itself at the origin.
    ///
    /// Each element's position is relative to the previous element. Empty when
    /// `id` does not contain the position.
    pub fn path_to_position(&self, id: ViewId, position: Point) -> Vec<ViewChild> {
        let mut path = Vec::new();
        if !self.contains_point(id, position) {
            return path;
        }
        let mut position = position;
        let mut next = Some(ViewChild::new(id, Point::ZERO));
        while let Some(child) = next {
            position -= child.position.to_vec2();
            path.push(child);
            next = self.child_at(child.view, position);
        }
        path
    }

    /// Chain of children from `id` down to `descendant`, both included.
    ///
    /// `None` when `descendant` is not in the subtree.
    pub fn path_to_view(&self, id: ViewId, descendant: ViewId) -> Option<Vec<ViewChild>> {
        let mut path = Vec::new();
        self.find_path(ViewChild::new(id, Point::ZERO), descendant, &mut path)
            .then_some(path)
    }

    fn find_path(&self, parent: ViewChild, descendant: ViewId, path: &mut Vec<ViewChild>) -> bool {
        path.push(parent);
        if parent.view == descendant {
            return true;
        }
        for child in self.children(parent.view) {
            if self.find_path(child, descendant, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Resolve a chain of view ids, each a child of the previous, into
    /// positioned children starting with `id` at the origin.
    ///
    /// Leading occurrences of `id` in `views` are skipped. Resolution stops at
    /// the first view that is not a child of its predecessor.
    pub fn resolve_child_path(&self, id: ViewId, views: &[ViewId]) -> Vec<ViewChild> {
        let mut path = vec![ViewChild::new(id, Point::ZERO)];
        let mut parent = id;
        for &view in views.iter().skip_while(|&&view| view == id) {
            let Some(position) = self.child_position(parent, view) else {
                break;
            };
            path.push(ViewChild::new(view, position));
            parent = view;
        }
        path
    }
}

/// Convert parent-relative positions along `path` into positions relative to
/// the first element's parent.
pub fn to_global_positions(path: &[ViewChild]) -> Vec<ViewChild> {
    let mut origin = Vec2::ZERO;
    path.iter()
        .map(|child| {
            let global = child.offset(origin);
            origin += child.position.to_vec2();
            global
        })
        .collect()
}
