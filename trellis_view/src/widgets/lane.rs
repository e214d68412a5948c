// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A row or column of children.

use kurbo::{Point, Size};
use trellis_layout::{
    Alignment, DirtyTracker, DirtyTrackingList, Direction, LayoutParameters, Length, Orientation,
};

use super::axis_distance;
use crate::child::{FocusSearchResult, ViewChild};
use crate::widget::{LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// Lays out children one after another along an [`Orientation`].
///
/// Children with a [`Length::Stretch`] axis are measured last, so that they
/// share whatever space the fixed and content-sized children leave over.
/// Children stretched across the lane (e.g. the height of a horizontal lane)
/// grow to the tallest non-stretched sibling rather than to the whole
/// available space.
#[derive(Debug)]
pub struct Lane {
    children: DirtyTrackingList<ViewId>,
    orientation: DirtyTracker<Orientation>,
    horizontal_content_alignment: DirtyTracker<Alignment>,
    vertical_content_alignment: DirtyTracker<Alignment>,
    positions: Vec<ViewChild>,
}

impl Default for Lane {
    fn default() -> Self {
        Self::new()
    }
}

impl Lane {
    /// Empty horizontal lane.
    pub fn new() -> Self {
        Self {
            children: DirtyTrackingList::new(),
            orientation: DirtyTracker::new(Orientation::Horizontal),
            horizontal_content_alignment: DirtyTracker::new(Alignment::Start),
            vertical_content_alignment: DirtyTracker::new(Alignment::Start),
            positions: Vec::new(),
        }
    }

    /// Lane along `orientation` holding `children` in order.
    pub fn with_children(
        orientation: Orientation,
        children: impl IntoIterator<Item = ViewId>,
    ) -> Self {
        Self {
            children: children.into_iter().collect(),
            orientation: DirtyTracker::new(orientation),
            ..Self::new()
        }
    }

    /// Children in layout order.
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

    /// Remove a child. Returns whether it was present.
    ///
    /// The child stays alive in the tree; remove it there as well to drop it.
    pub fn remove_child(&mut self, child: ViewId) -> bool {
        self.children.remove(&child)
    }

    /// Layout axis.
    pub fn orientation(&self) -> Orientation {
        *self.orientation
    }

    /// Set the layout axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation.set(orientation);
    }

    /// Horizontal placement of the children within the content box.
    pub fn horizontal_content_alignment(&self) -> Alignment {
        *self.horizontal_content_alignment
    }

    /// Set the horizontal placement of the children.
    pub fn set_horizontal_content_alignment(&mut self, alignment: Alignment) {
        self.horizontal_content_alignment.set(alignment);
    }

    /// Vertical placement of the children within the content box.
    pub fn vertical_content_alignment(&self) -> Alignment {
        *self.vertical_content_alignment
    }

    /// Set the vertical placement of the children.
    pub fn set_vertical_content_alignment(&mut self, alignment: Alignment) {
        self.vertical_content_alignment.set(alignment);
    }

    fn update_positions(
        &mut self,
        tree: &ViewTree,
        children: &[ViewId],
        children_size: Size,
        content_size: Size,
    ) {
        self.positions.clear();
        let horizontal = *self.horizontal_content_alignment;
        let vertical = *self.vertical_content_alignment;
        match *self.orientation {
            Orientation::Horizontal => {
                let mut x = horizontal.align(children_size.width, content_size.width);
                for &child in children {
                    let outer = tree.outer_size(child);
                    let y = vertical.align(outer.height, content_size.height);
                    self.positions.push(ViewChild::new(child, Point::new(x, y)));
                    x += outer.width;
                }
            }
            Orientation::Vertical => {
                let mut y = vertical.align(children_size.height, content_size.height);
                for &child in children {
                    let outer = tree.outer_size(child);
                    let x = horizontal.align(outer.width, content_size.width);
                    self.positions.push(ViewChild::new(child, Point::new(x, y)));
                    y += outer.height;
                }
            }
        }
    }

    fn nearest_child_index(&self, tree: &ViewTree, position: Point) -> Option<usize> {
        let orientation = *self.orientation;
        let axis_position = orientation.get(position);
        let mut best = None;
        let mut best_distance = f64::INFINITY;
        for (index, child) in self.positions.iter().enumerate() {
            let min = orientation.get(child.position);
            let max = min + orientation.get(tree.outer_size(child.view));
            let distance = axis_distance(axis_position, min, max).abs();
            if distance < best_distance {
                best_distance = distance;
                best = Some(index);
            }
        }
        best
    }
}

/// Signed distance along `orientation` from `position` to the found target.
fn target_distance(
    tree: &ViewTree,
    position: Point,
    found: &FocusSearchResult,
    orientation: Orientation,
) -> f64 {
    let min = orientation.get(found.global_target_position());
    let max = min + orientation.get(tree.outer_size(found.target.view));
    axis_distance(orientation.get(position), min, max)
}

fn is_correct_direction(
    tree: &ViewTree,
    position: Point,
    found: &FocusSearchResult,
    direction: Direction,
) -> bool {
    // Distances run from target to position, so a negative one lies ahead.
    let distance = target_distance(tree, position, found, direction.orientation());
    distance.is_sign_negative() ^ direction.is_reverse()
}

/// Running state of one measure pass.
struct LaneMeasure {
    orientation: Orientation,
    swap: Orientation,
    layout: LayoutParameters,
    limits: Size,
    children_size: Size,
}

impl LaneMeasure {
    fn measure_child(
        &mut self,
        cx: &mut LayoutCx<'_>,
        child: ViewId,
        mut child_limits: Size,
        deferred: bool,
    ) {
        let swap = self.swap;
        let stretches_across = swap.length(&cx.layout_of(child)).is_stretch();
        if stretches_across
            && (!deferred || matches!(swap.length(&self.layout), Length::Content))
        {
            let across = swap.get(self.children_size);
            if across > 0.0 {
                swap.set(&mut child_limits, across);
            }
        }
        cx.measure(child, child_limits);
        let outer = cx.outer_size(child);
        let along = self.orientation.get(outer);
        self.orientation.update(&mut self.limits, |v| v - along);
        self.orientation
            .update(&mut self.children_size, |v| v + along);
        if !stretches_across {
            let across = swap.get(outer);
            swap.update(&mut self.children_size, |v| v.max(across));
        }
    }
}

impl Widget for Lane {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout = cx.layout();
        let orientation = *self.orientation;
        let swap = orientation.swap();
        let children: Vec<ViewId> = self
            .children
            .iter()
            .copied()
            .filter(|&child| cx.is_alive(child))
            .collect();

        let mut pass = LaneMeasure {
            orientation,
            swap,
            layout,
            limits: layout.limits(available),
            children_size: Size::ZERO,
        };
        let mut deferred = Vec::new();
        for &child in &children {
            let child_layout = cx.layout_of(child);
            if child_layout.width.is_stretch() || child_layout.height.is_stretch() {
                deferred.push(child);
                continue;
            }
            let limits = pass.limits;
            pass.measure_child(cx, child, limits, false);
        }
        if !deferred.is_empty() {
            let mut deferred_limits = pass.limits;
            if pass.children_size != Size::ZERO {
                let children_size = pass.children_size;
                let across = swap
                    .length(&layout)
                    .resolve(swap.get(available), || swap.get(children_size));
                swap.set(&mut deferred_limits, across);
            }
            for child in deferred {
                orientation.set(&mut deferred_limits, orientation.get(pass.limits));
                pass.measure_child(cx, child, deferred_limits, true);
            }
        }

        let mut children_size = pass.children_size;
        if swap.get(children_size) == 0.0 && !children.is_empty() {
            let widest = children
                .iter()
                .map(|&child| swap.get(cx.outer_size(child)))
                .fold(f64::NEG_INFINITY, f64::max);
            swap.set(&mut children_size, widest);
        }
        let content_size = layout.resolve(available, || children_size);
        self.update_positions(cx.tree(), &children, children_size, content_size);
        content_size
    }

    fn children(&self) -> &[ViewChild] {
        &self.positions
    }

    fn owned_views(&self) -> Vec<ViewId> {
        self.children.to_vec()
    }

    fn is_content_dirty(&self, tree: &ViewTree) -> bool {
        self.orientation.is_dirty()
            || self.horizontal_content_alignment.is_dirty()
            || self.vertical_content_alignment.is_dirty()
            || self.children.is_dirty()
            || self.positions.iter().any(|child| tree.is_dirty(child.view))
    }

    fn reset_dirty(&mut self) {
        self.orientation.reset_dirty();
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
        // Whatever the direction, a child under the cursor gets the first say.
        let nearest_index = self.nearest_child_index(tree, position)?;
        let nearest = self.positions[nearest_index];
        let nearest_result = nearest.focus_search(tree, position, direction);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            nearest = tree.name(nearest.view),
            index = nearest_index,
            matched = nearest_result.is_some(),
            "lane nearest child"
        );
        if nearest_result.is_some() && nearest.contains_point(tree, position) {
            return nearest_result;
        }

        let orientation = *self.orientation;
        if direction.orientation() == orientation {
            if let Some(found) = &nearest_result
                && is_correct_direction(tree, position, found, direction)
            {
                return nearest_result;
            }
            let search = |child: &ViewChild| child.focus_search(tree, position, direction);
            return if direction.is_reverse() {
                self.positions[..nearest_index].iter().rev().find_map(search)
            } else {
                self.positions[nearest_index + 1..].iter().find_map(search)
            };
        }

        // Moving across the lane from inside one of its children would jump
        // sideways to a sibling; only entering from outside may do that.
        if nearest.contains_point(tree, position) {
            return None;
        }
        let measure = |found: Option<&FocusSearchResult>| {
            found.map_or(f64::INFINITY, |found| {
                target_distance(tree, position, found, orientation).abs()
            })
        };
        let nearest_distance = measure(nearest_result.as_ref());
        let mut ahead = (nearest_distance, nearest_result.clone());
        for child in &self.positions[nearest_index + 1..] {
            let found = child.focus_search(tree, position, direction);
            let distance = measure(found.as_ref());
            if distance < ahead.0 {
                ahead = (distance, found);
            } else if distance.is_finite() {
                // Everything further along is further away still.
                break;
            }
        }
        let mut behind = (nearest_distance, nearest_result);
        for child in self.positions[..nearest_index].iter().rev() {
            let found = child.focus_search(tree, position, direction);
            let distance = measure(found.as_ref());
            if distance < behind.0 {
                behind = (distance, found);
            } else if distance.is_finite() {
                break;
            }
        }
        if ahead.0 < behind.0 { ahead.1 } else { behind.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Spacer;

    fn fixed(tree: &mut ViewTree, w: f64, h: f64) -> ViewId {
        let id = tree.insert(Spacer::new());
        tree.set_layout(id, LayoutParameters::fixed_size(w, h));
        id
    }

    fn positions(tree: &ViewTree, lane: ViewId) -> Vec<Point> {
        tree.children(lane).iter().map(|c| c.position).collect()
    }

    #[test]
    fn fixed_children_line_up() {
        let mut tree = ViewTree::new();
        let children = [
            fixed(&mut tree, 10.0, 5.0),
            fixed(&mut tree, 20.0, 5.0),
            fixed(&mut tree, 30.0, 5.0),
        ];
        let lane = tree.insert(Lane::with_children(Orientation::Horizontal, children));
        tree.measure(lane, Size::new(1000.0, 1000.0));
        assert_eq!(tree.content_size(lane), Size::new(60.0, 5.0));
        assert_eq!(
            positions(&tree, lane),
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(30.0, 0.0),
            ]
        );
    }

    #[test]
    fn stretch_takes_remaining_space() {
        let mut tree = ViewTree::new();
        let fixed_child = fixed(&mut tree, 30.0, 12.0);
        let stretch = tree.insert(Spacer::new());
        tree.set_layout(stretch, LayoutParameters::fill());
        let lane = tree.insert(Lane::with_children(
            Orientation::Horizontal,
            [stretch, fixed_child],
        ));
        tree.measure(lane, Size::new(100.0, 80.0));
        // Width is what is left after the fixed child; height only grows to
        // the tallest sibling because the lane itself fits its content.
        assert_eq!(tree.outer_size(stretch), Size::new(70.0, 12.0));
        assert_eq!(tree.content_size(lane), Size::new(100.0, 12.0));
        // Positions follow list order, not measure order.
        assert_eq!(
            positions(&tree, lane),
            vec![Point::new(0.0, 0.0), Point::new(70.0, 0.0)]
        );
    }

    #[test]
    fn alignment_applies_to_both_axes() {
        let mut tree = ViewTree::new();
        let a = fixed(&mut tree, 10.0, 4.0);
        let b = fixed(&mut tree, 10.0, 8.0);
        let mut widget = Lane::with_children(Orientation::Horizontal, [a, b]);
        widget.set_horizontal_content_alignment(Alignment::End);
        widget.set_vertical_content_alignment(Alignment::Middle);
        let lane = tree.insert(widget);
        tree.set_layout(lane, LayoutParameters::fixed_size(50.0, 20.0));
        tree.measure(lane, Size::new(100.0, 100.0));
        assert_eq!(
            positions(&tree, lane),
            vec![Point::new(30.0, 8.0), Point::new(40.0, 6.0)]
        );
    }

    #[test]
    fn widget_changes_dirty_the_lane() {
        let mut tree = ViewTree::new();
        let a = fixed(&mut tree, 10.0, 10.0);
        let b = fixed(&mut tree, 10.0, 10.0);
        let lane = tree.insert(Lane::with_children(Orientation::Horizontal, [a, b]));
        let available = Size::new(100.0, 100.0);
        tree.measure(lane, available);
        assert!(!tree.is_dirty(lane));

        if let Ok(widget) = tree.widget_mut::<Lane>(lane) {
            widget.set_orientation(Orientation::Vertical);
        }
        assert!(tree.is_dirty(lane));
        assert!(tree.measure(lane, available));
        assert_eq!(tree.content_size(lane), Size::new(10.0, 20.0));

        // A dirty child dirties its parent.
        tree.set_layout(b, LayoutParameters::fixed_size(10.0, 15.0));
        assert!(tree.is_dirty(lane));
        assert!(tree.measure(lane, available));
        assert_eq!(tree.content_size(lane), Size::new(10.0, 25.0));
    }

    #[test]
    fn removed_children_are_skipped() {
        let mut tree = ViewTree::new();
        let a = fixed(&mut tree, 10.0, 10.0);
        let b = fixed(&mut tree, 20.0, 10.0);
        let lane = tree.insert(Lane::with_children(Orientation::Horizontal, [a, b]));
        tree.remove(a);
        tree.measure(lane, Size::new(100.0, 100.0));
        assert_eq!(tree.content_size(lane), Size::new(20.0, 10.0));
        assert_eq!(positions(&tree, lane), vec![Point::ZERO]);
    }

    fn focusable_column(tree: &mut ViewTree) -> (ViewId, ViewId, ViewId) {
        let first = fixed(tree, 50.0, 50.0);
        let second = fixed(tree, 50.0, 50.0);
        tree.set_focusable(first, true);
        tree.set_focusable(second, true);
        let lane = tree.insert(Lane::with_children(Orientation::Vertical, [first, second]));
        tree.measure(lane, Size::new(1000.0, 1000.0));
        (lane, first, second)
    }

    #[test]
    fn focus_moves_along_the_lane() {
        let mut tree = ViewTree::new();
        let (lane, first, second) = focusable_column(&mut tree);
        let target = |tree: &ViewTree, x: f64, y: f64, direction| {
            tree.focus_search(lane, Point::new(x, y), direction)
                .map(|found| found.target.view)
        };
        assert_eq!(target(&tree, 5.0, -10.0, Direction::South), Some(first));
        assert_eq!(target(&tree, 5.0, 10.0, Direction::South), Some(second));
        assert_eq!(target(&tree, 5.0, 10.0, Direction::North), None);
        assert_eq!(target(&tree, 5.0, 60.0, Direction::North), Some(first));
        assert_eq!(target(&tree, 5.0, 60.0, Direction::South), None);
    }

    #[test]
    fn focus_across_the_lane_enters_nearest_child() {
        let mut tree = ViewTree::new();
        let (lane, _, second) = focusable_column(&mut tree);
        let found = tree.focus_search(lane, Point::new(-20.0, 70.0), Direction::East);
        assert_eq!(found.as_ref().map(|f| f.target.view), Some(second));
        assert_eq!(
            found.map(|f| f.global_target_position()),
            Some(Point::new(0.0, 50.0))
        );
        // Already inside a child: no sideways jump.
        assert!(
            tree.focus_search(lane, Point::new(10.0, 70.0), Direction::East)
                .is_none()
        );
    }

    #[test]
    fn focus_across_prefers_closer_focusable_descendant() {
        let mut tree = ViewTree::new();
        // The nearest child holds nothing focusable; the next one does.
        let blank = fixed(&mut tree, 40.0, 20.0);
        let target = fixed(&mut tree, 40.0, 20.0);
        tree.set_focusable(target, true);
        let lane = tree.insert(Lane::with_children(Orientation::Vertical, [blank, target]));
        tree.measure(lane, Size::new(1000.0, 1000.0));
        let found = tree.focus_search(lane, Point::new(-10.0, 5.0), Direction::East);
        assert_eq!(found.map(|f| f.target.view), Some(target));
    }
}
