// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform cells that wrap into lanes.

use kurbo::{Point, Size, Vec2};
use smallvec::smallvec;
use trellis_layout::{
    Alignment, DirtyTracker, DirtyTrackingList, Direction, GridItemLayout, Orientation,
};

use crate::child::{FocusSearchResult, ViewChild};
use crate::widget::{ChildList, LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// Column and row of a cell. Either may be out of range while stepping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cell {
    column: isize,
    row: isize,
}

impl Cell {
    fn advance(self, direction: Direction) -> Self {
        let Self { column, row } = self;
        match direction {
            Direction::North => Self { column, row: row - 1 },
            Direction::South => Self { column, row: row + 1 },
            Direction::West => Self { column: column - 1, row },
            Direction::East => Self { column: column + 1, row },
        }
    }
}

/// Places children in equally sized cells along the primary orientation,
/// wrapping into a new lane when a lane is full.
///
/// With a horizontal primary orientation the lanes are rows; each row is as
/// tall as its tallest child. Children smaller than their cell are placed by
/// the item alignments.
#[derive(Debug)]
pub struct Grid {
    children: DirtyTrackingList<ViewId>,
    item_layout: DirtyTracker<GridItemLayout>,
    item_spacing: DirtyTracker<Vec2>,
    primary_orientation: DirtyTracker<Orientation>,
    horizontal_item_alignment: DirtyTracker<Alignment>,
    vertical_item_alignment: DirtyTracker<Alignment>,
    positions: Vec<ViewChild>,
    /// Secondary-axis start of each lane, plus the end of the last one.
    secondary_starts: Vec<f64>,
    item_length: f64,
    count_before_wrap: usize,
    content_size: Size,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Empty grid with five cells per row.
    pub fn new() -> Self {
        Self {
            children: DirtyTrackingList::new(),
            item_layout: DirtyTracker::new(GridItemLayout::default()),
            item_spacing: DirtyTracker::new(Vec2::ZERO),
            primary_orientation: DirtyTracker::new(Orientation::Horizontal),
            horizontal_item_alignment: DirtyTracker::new(Alignment::Start),
            vertical_item_alignment: DirtyTracker::new(Alignment::Start),
            positions: Vec::new(),
            secondary_starts: Vec::new(),
            item_length: 0.0,
            count_before_wrap: 1,
            content_size: Size::ZERO,
        }
    }

    /// Grid with `item_layout` holding `children` in order.
    pub fn with_children(
        item_layout: GridItemLayout,
        children: impl IntoIterator<Item = ViewId>,
    ) -> Self {
        Self {
            children: children.into_iter().collect(),
            item_layout: DirtyTracker::new(item_layout),
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

    /// Cell sizing rule.
    pub fn item_layout(&self) -> GridItemLayout {
        *self.item_layout
    }

    /// Set the cell sizing rule.
    pub fn set_item_layout(&mut self, item_layout: GridItemLayout) {
        self.item_layout.set(item_layout);
    }

    /// Gap between cells (`x`) and between lanes (`y`), for a horizontal grid.
    /// Components follow the axes, not the orientation.
    pub fn item_spacing(&self) -> Vec2 {
        *self.item_spacing
    }

    /// Set the gap between cells.
    pub fn set_item_spacing(&mut self, spacing: Vec2) {
        self.item_spacing.set(spacing);
    }

    /// Axis along which cells fill a lane before wrapping.
    pub fn primary_orientation(&self) -> Orientation {
        *self.primary_orientation
    }

    /// Set the axis along which cells fill a lane.
    pub fn set_primary_orientation(&mut self, orientation: Orientation) {
        self.primary_orientation.set(orientation);
    }

    /// Horizontal placement of a child within its cell.
    pub fn horizontal_item_alignment(&self) -> Alignment {
        *self.horizontal_item_alignment
    }

    /// Set the horizontal placement of children within their cells.
    pub fn set_horizontal_item_alignment(&mut self, alignment: Alignment) {
        self.horizontal_item_alignment.set(alignment);
    }

    /// Vertical placement of a child within its cell.
    pub fn vertical_item_alignment(&self) -> Alignment {
        *self.vertical_item_alignment
    }

    /// Set the vertical placement of children within their cells.
    pub fn set_vertical_item_alignment(&mut self, alignment: Alignment) {
        self.vertical_item_alignment.set(alignment);
    }

    /// Primary-axis cell index of `position`: `-1` before the grid, the cell
    /// count past its end.
    fn primary_index(&self, position: Point) -> isize {
        let primary = *self.primary_orientation;
        let axis_position = primary.get(position);
        let count = isize::try_from(self.count_before_wrap).unwrap_or(isize::MAX);
        if axis_position < 0.0 {
            return -1;
        }
        if axis_position >= primary.get(self.content_size) {
            return count;
        }
        let cell_length = self.item_length + primary.get(*self.item_spacing);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Saturating float to integer conversion is intended here."
        )]
        let index = (axis_position / cell_length) as isize;
        index.clamp(0, count)
    }

    /// Lane index of `position`. Gaps belong to the following lane.
    fn secondary_index(&self, position: Point) -> isize {
        let secondary = self.primary_orientation.swap();
        let axis_position = secondary.get(position);
        let starts = self.secondary_starts.len();
        if axis_position < 0.0 {
            return -1;
        }
        if axis_position >= secondary.get(self.content_size) {
            return isize::try_from(starts).unwrap_or(isize::MAX);
        }
        let at_or_before = self
            .secondary_starts
            .partition_point(|&start| start <= axis_position);
        let index = at_or_before.saturating_sub(1).min(starts.saturating_sub(1));
        isize::try_from(index).unwrap_or(isize::MAX)
    }

    fn cell_at(&self, position: Point) -> Cell {
        let primary = self.primary_index(position);
        let secondary = self.secondary_index(position);
        match *self.primary_orientation {
            Orientation::Horizontal => Cell {
                column: primary,
                row: secondary,
            },
            Orientation::Vertical => Cell {
                column: secondary,
                row: primary,
            },
        }
    }

    /// Child index of `cell`.
    ///
    /// Cells past the end of a lane clamp to its last cell. The result may be
    /// past the end of the child list when the final lane is short; callers
    /// decide whether that counts.
    fn child_index_at(&self, cell: Cell) -> Option<usize> {
        let column = usize::try_from(cell.column).ok()?;
        let row = usize::try_from(cell.row).ok()?;
        let (primary, secondary) = match *self.primary_orientation {
            Orientation::Horizontal => (column, row),
            Orientation::Vertical => (row, column),
        };
        if secondary >= self.secondary_starts.len() {
            return None;
        }
        let count = self.count_before_wrap.max(1);
        Some(secondary * count + primary.min(count - 1))
    }
}

impl Widget for Grid {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout = cx.layout();
        let limits = layout.limits(available);
        let primary = *self.primary_orientation;
        let secondary = primary.swap();
        let spacing = *self.item_spacing;
        let primary_spacing = primary.get(spacing);
        let secondary_spacing = secondary.get(spacing);
        let (item_length, count_before_wrap) = self
            .item_layout
            .item_length_and_count(primary.get(limits), primary_spacing);
        self.item_length = item_length;
        self.count_before_wrap = count_before_wrap;
        let horizontal = *self.horizontal_item_alignment;
        let vertical = *self.vertical_item_alignment;

        let children: Vec<ViewId> = self
            .children
            .iter()
            .copied()
            .filter(|&child| cx.is_alive(child))
            .collect();
        self.positions.clear();
        self.secondary_starts.clear();
        self.secondary_starts.push(0.0);
        let mut secondary_available = secondary.get(limits);
        let mut secondary_used = 0.0;
        let mut max_secondary = 0.0_f64;
        let mut position = Point::ZERO;
        let mut lane_start = 0;
        for (index, &child) in children.iter().enumerate() {
            let mut child_limits = Size::ZERO;
            primary.set(&mut child_limits, item_length);
            secondary.set(&mut child_limits, secondary_available);
            cx.measure(child, child_limits);
            self.positions.push(ViewChild::new(child, position));
            max_secondary = max_secondary.max(secondary.get(cx.outer_size(child)));

            let lane_full = self.positions.len() - lane_start >= count_before_wrap;
            if !lane_full && index + 1 < children.len() {
                primary.update(&mut position, |v| v + item_length + primary_spacing);
                continue;
            }
            // Lane complete: its height is now known, so align within cells.
            let mut cell = child_limits;
            secondary.set(&mut cell, max_secondary);
            for placed in &mut self.positions[lane_start..] {
                let outer = cx.outer_size(placed.view);
                placed.position += Vec2::new(
                    horizontal.align(outer.width, cell.width),
                    vertical.align(outer.height, cell.height),
                );
            }
            primary.set(&mut position, 0.0);
            secondary.update(&mut position, |v| v + max_secondary + secondary_spacing);
            if lane_start > 0 {
                secondary_used += secondary_spacing;
            }
            secondary_used += max_secondary;
            secondary_available -= max_secondary + secondary_spacing;
            self.secondary_starts.push(secondary_used);
            max_secondary = 0.0;
            lane_start = self.positions.len();
        }

        let mut accumulated = limits;
        secondary.set(&mut accumulated, secondary_used);
        self.content_size = layout.resolve(available, || accumulated);
        self.content_size
    }

    fn children(&self) -> &[ViewChild] {
        &self.positions
    }

    fn owned_views(&self) -> Vec<ViewId> {
        self.children.to_vec()
    }

    fn children_at(&self, tree: &ViewTree, position: Point) -> ChildList {
        let child = self
            .child_index_at(self.cell_at(position))
            .and_then(|index| self.positions.get(index));
        // The last lane clamps, so confirm the hit.
        match child {
            Some(child) if child.contains_point(tree, position) => smallvec![*child],
            _ => ChildList::new(),
        }
    }

    fn is_content_dirty(&self, tree: &ViewTree) -> bool {
        self.item_layout.is_dirty()
            || self.item_spacing.is_dirty()
            || self.primary_orientation.is_dirty()
            || self.horizontal_item_alignment.is_dirty()
            || self.vertical_item_alignment.is_dirty()
            || self.children.is_dirty()
            || self.children.iter().any(|&child| tree.is_dirty(child))
    }

    fn reset_dirty(&mut self) {
        self.item_layout.reset_dirty();
        self.item_spacing.reset_dirty();
        self.primary_orientation.reset_dirty();
        self.horizontal_item_alignment.reset_dirty();
        self.vertical_item_alignment.reset_dirty();
        self.children.reset_dirty();
    }

    fn find_focusable_descendant(
        &self,
        tree: &ViewTree,
        position: Point,
        direction: Direction,
    ) -> Option<FocusSearchResult> {
        let along_lane = direction.orientation() == *self.primary_orientation;
        let mut cell = self.cell_at(position);
        // Guards against a layout inconsistency revisiting the same child forever.
        let mut previous = None;
        loop {
            cell = cell.advance(direction);
            let index = self.child_index_at(cell)?;
            if previous == Some(index) {
                return None;
            }
            // Only the short final lane yields indices past the end. Moving
            // across lanes snaps to the last child; moving along the lane
            // past its end finds nothing here.
            let candidate = match self.positions.get(index) {
                Some(child) => Some(child),
                None if along_lane => None,
                None => self.positions.last(),
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(?cell, index, candidate = ?candidate.map(|c| c.view), "grid step");
            if let Some(found) =
                candidate.and_then(|child| child.focus_search(tree, position, direction))
            {
                return Some(found);
            }
            previous = Some(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Spacer;
    use trellis_layout::LayoutParameters;

    fn items(tree: &mut ViewTree, count: usize, w: f64, h: f64) -> Vec<ViewId> {
        (0..count)
            .map(|_| {
                let id = tree.insert(Spacer::new());
                tree.set_layout(id, LayoutParameters::fixed_size(w, h));
                tree.set_focusable(id, true);
                id
            })
            .collect()
    }

    /// Three 30x20 cells per row, 10 between cells and 5 between rows.
    fn grid(tree: &mut ViewTree, children: &[ViewId], per_lane: usize) -> ViewId {
        let mut widget = Grid::with_children(GridItemLayout::Count(per_lane), children.iter().copied());
        widget.set_item_spacing(Vec2::new(10.0, 5.0));
        let id = tree.insert(widget);
        let width = 40.0 * per_lane as f64 - 10.0;
        tree.measure(id, Size::new(width, 1000.0));
        id
    }

    fn center(tree: &ViewTree, grid: ViewId, child: ViewId) -> Point {
        tree.children(grid)
            .iter()
            .find(|c| c.view == child)
            .map(|c| c.center(tree))
            .unwrap_or(Point::ZERO)
    }

    fn step(tree: &ViewTree, grid: ViewId, from: ViewId, direction: Direction) -> Option<ViewId> {
        tree.focus_search(grid, center(tree, grid, from), direction)
            .map(|found| found.target.view)
    }

    #[test]
    fn wraps_into_rows() {
        let mut tree = ViewTree::new();
        let children = items(&mut tree, 5, 30.0, 20.0);
        let grid = grid(&mut tree, &children, 3);
        let positions: Vec<_> = tree.children(grid).iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
                Point::new(80.0, 0.0),
                Point::new(0.0, 25.0),
                Point::new(40.0, 25.0),
            ]
        );
        assert_eq!(tree.content_size(grid), Size::new(110.0, 45.0));
    }

    #[test]
    fn small_items_align_within_cells() {
        let mut tree = ViewTree::new();
        let tall = items(&mut tree, 1, 30.0, 20.0);
        let small = items(&mut tree, 1, 10.0, 10.0);
        let mut widget = Grid::with_children(GridItemLayout::Count(2), [tall[0], small[0]]);
        widget.set_item_spacing(Vec2::new(10.0, 0.0));
        widget.set_horizontal_item_alignment(Alignment::Middle);
        widget.set_vertical_item_alignment(Alignment::End);
        let grid = tree.insert(widget);
        tree.measure(grid, Size::new(70.0, 100.0));
        assert_eq!(
            tree.child_position(grid, small[0]),
            Some(Point::new(50.0, 10.0))
        );
    }

    #[test]
    fn hit_testing_uses_cells() {
        let mut tree = ViewTree::new();
        let children = items(&mut tree, 5, 30.0, 20.0);
        let grid = grid(&mut tree, &children, 3);
        let hit = |x, y| tree.child_at(grid, Point::new(x, y)).map(|c| c.view);
        assert_eq!(hit(45.0, 30.0), Some(children[4]));
        assert_eq!(hit(85.0, 5.0), Some(children[2]));
        // Gaps and the empty end of the short row hit nothing.
        assert_eq!(hit(35.0, 5.0), None);
        assert_eq!(hit(85.0, 30.0), None);
    }

    #[test]
    fn focus_steps_between_cells() {
        let mut tree = ViewTree::new();
        let c = items(&mut tree, 5, 30.0, 20.0);
        let grid = grid(&mut tree, &c, 3);
        assert_eq!(step(&tree, grid, c[0], Direction::East), Some(c[1]));
        assert_eq!(step(&tree, grid, c[1], Direction::South), Some(c[4]));
        assert_eq!(step(&tree, grid, c[3], Direction::North), Some(c[0]));
        assert_eq!(step(&tree, grid, c[0], Direction::West), None);
        assert_eq!(step(&tree, grid, c[1], Direction::North), None);
    }

    #[test]
    fn short_row_snaps_only_across_lanes() {
        let mut tree = ViewTree::new();
        let c = items(&mut tree, 5, 30.0, 20.0);
        let grid = grid(&mut tree, &c, 3);
        // Down from the last column lands on the last item of the short row.
        assert_eq!(step(&tree, grid, c[2], Direction::South), Some(c[4]));
        // Continuing along the short row past its end leaves the grid.
        assert_eq!(step(&tree, grid, c[4], Direction::East), None);
        // Entering the short row from the right skips the missing cell.
        let found = tree
            .focus_search(grid, Point::new(200.0, 35.0), Direction::West)
            .map(|found| found.target.view);
        assert_eq!(found, Some(c[4]));
    }

    #[test]
    fn single_row() {
        let mut tree = ViewTree::new();
        let c = items(&mut tree, 3, 30.0, 20.0);
        let grid = grid(&mut tree, &c, 3);
        assert_eq!(step(&tree, grid, c[0], Direction::East), Some(c[1]));
        assert_eq!(step(&tree, grid, c[2], Direction::East), None);
        assert_eq!(step(&tree, grid, c[1], Direction::North), None);
        assert_eq!(step(&tree, grid, c[1], Direction::South), None);
        // From above, each column is entered directly.
        let found = tree
            .focus_search(grid, Point::new(85.0, -10.0), Direction::South)
            .map(|found| found.target.view);
        assert_eq!(found, Some(c[2]));
    }

    #[test]
    fn single_column() {
        let mut tree = ViewTree::new();
        let c = items(&mut tree, 3, 30.0, 20.0);
        let grid = grid(&mut tree, &c, 1);
        assert_eq!(step(&tree, grid, c[0], Direction::South), Some(c[1]));
        assert_eq!(step(&tree, grid, c[2], Direction::North), Some(c[1]));
        assert_eq!(step(&tree, grid, c[2], Direction::South), None);
        assert_eq!(step(&tree, grid, c[0], Direction::East), None);
        assert_eq!(step(&tree, grid, c[0], Direction::West), None);
    }

    #[test]
    fn vertical_primary_fills_columns() {
        let mut tree = ViewTree::new();
        let c = items(&mut tree, 3, 30.0, 20.0);
        let mut widget = Grid::with_children(GridItemLayout::Length(20.0), c.iter().copied());
        widget.set_primary_orientation(Orientation::Vertical);
        let grid = tree.insert(widget);
        tree.measure(grid, Size::new(1000.0, 45.0));
        let positions: Vec<_> = tree.children(grid).iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 20.0),
                Point::new(30.0, 0.0),
            ]
        );
        assert_eq!(step(&tree, grid, c[1], Direction::East), Some(c[2]));
    }
}
