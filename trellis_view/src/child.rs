// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned child references and focus search results.

use kurbo::{Point, Vec2};
use trellis_layout::{Bounds, Direction};

use crate::{ViewId, ViewTree};

/// A view together with its origin in the parent's coordinate space.
///
/// `ViewChild` is transient: containers hand these out during traversal and
/// callers should not expect the position to stay correct after the next layout.
/// It holds only a [`ViewId`], so it never keeps the view alive; use
/// [`ViewChild::is_alive`] before acting on one that was stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewChild {
    /// The child view.
    pub view: ViewId,
    /// Origin of the child's outer box in the parent's coordinates.
    pub position: Point,
}

impl ViewChild {
    /// Pair `view` with `position`.
    pub fn new(view: ViewId, position: Point) -> Self {
        Self { view, position }
    }

    /// Whether the referenced view still exists in `tree`.
    pub fn is_alive(&self, tree: &ViewTree) -> bool {
        tree.is_alive(self.view)
    }

    /// Actual bounds of the view, in parent coordinates.
    pub fn actual_bounds(&self, tree: &ViewTree) -> Bounds {
        tree.actual_bounds(self.view).offset(self.position.to_vec2())
    }

    /// Content bounds of the view, in parent coordinates.
    pub fn content_bounds(&self, tree: &ViewTree) -> Bounds {
        tree.content_bounds(self.view).offset(self.position.to_vec2())
    }

    /// Bounds of every floating element in the view's subtree, in parent coordinates.
    pub fn floating_bounds(&self, tree: &ViewTree) -> Vec<Bounds> {
        let offset = self.position.to_vec2();
        tree.floating_bounds(self.view)
            .into_iter()
            .map(|bounds| bounds.offset(offset))
            .collect()
    }

    /// Center of the view's content area, in parent coordinates.
    pub fn center(&self, tree: &ViewTree) -> Point {
        self.content_bounds(tree).center()
    }

    /// Whether `point` (parent coordinates) hits the view.
    pub fn contains_point(&self, tree: &ViewTree, point: Point) -> bool {
        tree.contains_point(self.view, point - self.position.to_vec2())
    }

    /// Whether the view lies in `direction` from `origin`, or contains it.
    ///
    /// Only the axis of `direction` is considered: a view is "east" of the
    /// origin when its right edge is beyond it, regardless of vertical overlap.
    pub fn is_in_direction(&self, tree: &ViewTree, origin: Point, direction: Direction) -> bool {
        let bounds = tree.actual_bounds(self.view);
        let relative = origin - self.position.to_vec2();
        match direction {
            Direction::North => relative.y >= bounds.top(),
            Direction::South => relative.y < bounds.bottom(),
            Direction::West => relative.x >= bounds.left(),
            Direction::East => relative.x < bounds.right(),
        }
    }

    /// Focus search inside this child, with `position` and the result in
    /// parent coordinates.
    pub fn focus_search(
        &self,
        tree: &ViewTree,
        position: Point,
        direction: Direction,
    ) -> Option<FocusSearchResult> {
        let offset = self.position.to_vec2();
        tree.focus_search(self.view, position - offset, direction)
            .map(|result| result.offset(offset))
    }

    /// Copy of this child moved by `distance`.
    #[must_use]
    pub fn offset(&self, distance: Vec2) -> Self {
        Self::new(self.view, self.position + distance)
    }
}

/// Outcome of a directional focus search.
///
/// `path` runs from the view the search started on down to the parent of
/// `target`; each element's position is relative to the previous element's
/// content (the first is relative to the search root). `target` is relative to
/// the last element of `path`, or to the root when `path` is empty. Summing
/// positions along `path` and `target` gives the target's position in the
/// root's coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSearchResult {
    /// The view that should receive focus.
    pub target: ViewChild,
    /// Views between the search root and `target`.
    pub path: Vec<ViewChild>,
}

impl FocusSearchResult {
    /// Result with a target and no intermediate views.
    pub fn new(target: ViewChild) -> Self {
        Self {
            target,
            path: Vec::new(),
        }
    }

    /// Re-root this result under `parent`, whose content is at `position`.
    ///
    /// The first path element (or the target, when the path is empty) is moved
    /// by `position`, then `parent` is prepended at the origin.
    #[must_use]
    pub fn as_child(self, parent: ViewId, position: Vec2) -> Self {
        let Self { target, path } = self.offset(position);
        let mut rooted = Vec::with_capacity(path.len() + 1);
        rooted.push(ViewChild::new(parent, Point::ZERO));
        rooted.extend(path);
        Self {
            target,
            path: rooted,
        }
    }

    /// Move the outermost element (first path element, else the target).
    #[must_use]
    pub fn offset(mut self, distance: Vec2) -> Self {
        match self.path.first_mut() {
            Some(first) => *first = first.offset(distance),
            None => self.target = self.target.offset(distance),
        }
        self
    }

    /// Target position in the search root's coordinates.
    pub fn global_target_position(&self) -> Point {
        self.path
            .iter()
            .fold(self.target.position, |acc, child| acc + child.position.to_vec2())
    }
}
