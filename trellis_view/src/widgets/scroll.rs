// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A clipped viewport over content that may be longer than it.

use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use trellis_layout::{Bounds, DirtyTracker, Direction, Orientation};

use crate::child::{FocusSearchResult, ViewChild};
use crate::focus::to_global_positions;
use crate::property::Property;
use crate::widget::{DrawCx, LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// How much of a path fits in the viewport, accumulated leaf first.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Scrollability {
    /// These bounds fit and so may an ancestor's.
    Fully(Bounds),
    /// These bounds fit, but an ancestor that should scroll with them does not.
    Partially(Bounds),
    /// Even the leaf is longer than the viewport.
    NotScrollable,
    NoMoreElements,
}

/// Shows a window onto content that is unbounded along one axis.
///
/// The scroll offset is always within `[0, scroll_size]`, where the scroll
/// size is how much longer the content is than the viewport. Changing the
/// offset moves the content without a new layout pass. Offset changes are
/// reported as [`Property::ScrollOffset`] on the next
/// [`ViewTree::update`], or immediately when caused by
/// [`ViewTree::scroll_into_view`].
#[derive(Debug)]
pub struct ScrollContainer {
    content: DirtyTracker<Option<ViewId>>,
    orientation: DirtyTracker<Orientation>,
    scroll_offset: DirtyTracker<f64>,
    peeking: f64,
    scroll_step: f64,
    child: Option<ViewChild>,
    viewport: Size,
    content_extent: Size,
    previous_scroll_size: Option<f64>,
}

impl Default for ScrollContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollContainer {
    /// Empty vertical scroll container with a 32 px step and no peeking.
    pub fn new() -> Self {
        Self {
            content: DirtyTracker::new(None),
            orientation: DirtyTracker::new(Orientation::Vertical),
            scroll_offset: DirtyTracker::new(0.0),
            peeking: 0.0,
            scroll_step: 32.0,
            child: None,
            viewport: Size::ZERO,
            content_extent: Size::ZERO,
            previous_scroll_size: None,
        }
    }

    /// Vertical scroll container over `content`.
    pub fn with_content(content: ViewId) -> Self {
        Self {
            content: DirtyTracker::new(Some(content)),
            ..Self::new()
        }
    }

    /// The scrolled view.
    pub fn content(&self) -> Option<ViewId> {
        *self.content
    }

    /// Replace the scrolled view.
    pub fn set_content(&mut self, content: Option<ViewId>) {
        self.content.set(content);
    }

    /// Scroll axis.
    pub fn orientation(&self) -> Orientation {
        *self.orientation
    }

    /// Set the scroll axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation.set(orientation);
    }

    /// Space kept visible beyond a view scrolled into view, hinting that more
    /// content follows.
    pub fn peeking(&self) -> f64 {
        self.peeking
    }

    /// Set the peeking distance.
    pub fn set_peeking(&mut self, peeking: f64) {
        self.peeking = peeking;
    }

    /// Distance moved by [`Self::scroll_forward`] and [`Self::scroll_backward`].
    pub fn scroll_step(&self) -> f64 {
        self.scroll_step
    }

    /// Set the step distance.
    pub fn set_scroll_step(&mut self, step: f64) {
        self.scroll_step = step;
    }

    /// Current scroll distance from the start of the content.
    pub fn scroll_offset(&self) -> f64 {
        *self.scroll_offset
    }

    /// Scroll to `offset`, clamped to `[0, scroll_size]`. Returns whether the
    /// offset changed.
    pub fn set_scroll_offset(&mut self, offset: f64) -> bool {
        let clamped = offset.clamp(0.0, self.scroll_size());
        self.scroll_offset.set(clamped)
    }

    /// Largest valid scroll offset, as of the last layout.
    pub fn scroll_size(&self) -> f64 {
        let orientation = *self.orientation;
        (orientation.get(self.content_extent) - orientation.get(self.viewport)).max(0.0)
    }

    /// Scroll one step towards the end. Returns whether anything moved.
    pub fn scroll_forward(&mut self) -> bool {
        self.set_scroll_offset(*self.scroll_offset + self.scroll_step)
    }

    /// Scroll one step towards the start. Returns whether anything moved.
    pub fn scroll_backward(&mut self) -> bool {
        self.set_scroll_offset(*self.scroll_offset - self.scroll_step)
    }

    fn scroll_origin(&self) -> Vec2 {
        self.orientation.create_vector(*self.scroll_offset)
    }

    fn fits(&self, bounds: Bounds) -> bool {
        let orientation = *self.orientation;
        orientation.get(bounds.size) <= orientation.get(self.viewport)
    }

    /// Grow the leaf's bounds upward through ancestors that ask to scroll
    /// with their children, stopping before the union outgrows the viewport.
    fn accumulate_bounds(&self, tree: &ViewTree, global_path: &[ViewChild]) -> Scrollability {
        let Some((child, rest)) = global_path.split_first() else {
            return Scrollability::NoMoreElements;
        };
        match self.accumulate_bounds(tree, rest) {
            Scrollability::NoMoreElements => {
                let bounds = child.actual_bounds(tree);
                if self.fits(bounds) {
                    Scrollability::Fully(bounds)
                } else {
                    Scrollability::NotScrollable
                }
            }
            Scrollability::Fully(bounds) => {
                let scrolls_with = tree
                    .core(child.view)
                    .and_then(|core| core.scroll_with_children());
                if scrolls_with != Some(*self.orientation) {
                    return Scrollability::Fully(bounds);
                }
                let union = bounds.union(child.actual_bounds(tree));
                if self.fits(union) {
                    Scrollability::Fully(union)
                } else {
                    Scrollability::Partially(bounds)
                }
            }
            other => other,
        }
    }

    /// Change in offset needed to show `bounds` with the peeking margin.
    fn scroll_distance(&self, bounds: Bounds) -> f64 {
        let orientation = *self.orientation;
        let offset = *self.scroll_offset;
        let start = orientation.get(bounds.origin);
        if start < offset + self.peeking {
            return start - offset - self.peeking;
        }
        let end = start + orientation.get(bounds.size);
        let length = orientation.get(self.viewport);
        if end > offset + length - self.peeking {
            return end - length - offset + self.peeking;
        }
        0.0
    }

    fn report_scroll(&mut self, tree: &mut ViewTree, this: ViewId) {
        let scroll_size = self.scroll_size();
        if self.scroll_offset.is_dirty() || self.previous_scroll_size != Some(scroll_size) {
            self.scroll_offset.reset_dirty();
            self.previous_scroll_size = Some(scroll_size);
            tree.notify(this, Property::ScrollOffset);
        }
    }
}

impl Widget for ScrollContainer {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout = cx.layout();
        let limits = layout.limits(available);
        let orientation = *self.orientation;
        let content = (*self.content).filter(|&content| cx.is_alive(content));
        self.content_extent = content.map_or(Size::ZERO, |content| {
            let mut content_limits = limits;
            orientation.set(&mut content_limits, f64::INFINITY);
            cx.measure(content, content_limits);
            cx.outer_size(content)
        });
        self.child = content.map(|content| ViewChild::new(content, Point::ZERO));

        let extent = self.content_extent;
        let mut size = layout.resolve(available, || extent);
        let max_length = orientation.get(limits);
        if max_length.is_finite() {
            orientation.set(&mut size, max_length);
        }
        self.viewport = layout.resolve(available, || size);
        // The viewport or content may have shrunk.
        self.set_scroll_offset(*self.scroll_offset);
        self.viewport
    }

    fn draw_content(&self, cx: &mut DrawCx<'_>) {
        let Some(child) = self.child else {
            return;
        };
        let viewport = Rect::from_origin_size(Point::ZERO, self.viewport);
        let origin = self.scroll_origin();
        cx.surface().save();
        cx.surface().clip(viewport);
        cx.surface().translate(-origin);
        cx.draw_child(child);
        cx.surface().restore();
    }

    fn layout_offset(&self) -> Vec2 {
        -self.scroll_origin()
    }

    fn children(&self) -> &[ViewChild] {
        self.child.as_slice()
    }

    fn owned_views(&self) -> Vec<ViewId> {
        (*self.content).into_iter().collect()
    }

    fn find_focusable_descendant(
        &self,
        tree: &ViewTree,
        position: Point,
        direction: Direction,
    ) -> Option<FocusSearchResult> {
        self.child?.focus_search(tree, position, direction)
    }

    fn is_content_dirty(&self, tree: &ViewTree) -> bool {
        // The offset moves content without needing a new layout.
        self.content.is_dirty()
            || self.orientation.is_dirty()
            || (*self.content).is_some_and(|content| tree.is_dirty(content))
    }

    fn reset_dirty(&mut self) {
        self.content.reset_dirty();
        self.orientation.reset_dirty();
    }

    fn scroll_into_view(
        &mut self,
        tree: &mut ViewTree,
        this: ViewId,
        path: &[ViewChild],
    ) -> Option<Vec2> {
        let mut descendants = path.to_vec();
        // The content's position includes the current scroll; work from the
        // unscrolled layout instead.
        let first = descendants.first_mut()?;
        *first = first.offset(self.scroll_origin());

        // Innermost containers scroll first.
        let mut distance = Vec2::ZERO;
        let mut descendant_scrolled = false;
        for index in (0..descendants.len() - 1).rev() {
            let view = descendants[index].view;
            if let Some(scrolled) = tree.scroll_into_view(view, &descendants[index + 1..]) {
                distance += scrolled;
                descendant_scrolled = true;
            }
        }

        let bounds = match self.accumulate_bounds(tree, &to_global_positions(&descendants)) {
            Scrollability::Fully(bounds) | Scrollability::Partially(bounds) => bounds,
            Scrollability::NotScrollable | Scrollability::NoMoreElements => return None,
        };
        let scroll_distance = self.scroll_distance(bounds);
        #[cfg(feature = "tracing")]
        tracing::debug!(view = tree.name(this), ?bounds, scroll_distance, "scroll into view");
        if scroll_distance != 0.0 {
            let previous = *self.scroll_offset;
            self.set_scroll_offset(previous + scroll_distance);
            distance += self
                .orientation
                .create_vector(*self.scroll_offset - previous);
            self.report_scroll(tree, this);
            return Some(distance);
        }
        descendant_scrolled.then_some(distance)
    }

    fn update(&mut self, tree: &mut ViewTree, this: ViewId, _elapsed: Duration) {
        self.report_scroll(tree, this);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewTreeConfig;
    use crate::widgets::{Lane, Spacer};
    use trellis_layout::{Edges, LayoutParameters, Length};

    struct Fixture {
        tree: ViewTree,
        scroll: ViewId,
        target: ViewId,
        top: ViewId,
    }

    /// A 200 px viewport over 1000 px of content; `target` spans 900..950.
    fn fixture(peeking: f64) -> Fixture {
        let mut tree = ViewTree::with_config(ViewTreeConfig {
            record_changes: true,
            ..ViewTreeConfig::default()
        });
        let top = tree.insert(Spacer::new());
        tree.set_layout(top, LayoutParameters::fixed_size(100.0, 900.0));
        let target = tree.insert(Spacer::new());
        tree.set_layout(target, LayoutParameters::fixed_size(100.0, 50.0));
        let rest = tree.insert(Spacer::new());
        tree.set_layout(rest, LayoutParameters::fixed_size(100.0, 50.0));
        let lane = tree.insert(Lane::with_children(
            Orientation::Vertical,
            [top, target, rest],
        ));
        let mut widget = ScrollContainer::with_content(lane);
        widget.set_peeking(peeking);
        let scroll = tree.insert(widget);
        tree.set_layout(
            scroll,
            LayoutParameters {
                width: Length::Px(100.0),
                height: Length::Px(200.0),
                ..LayoutParameters::default()
            },
        );
        tree.measure(scroll, Size::new(500.0, 500.0));
        tree.take_changes();
        Fixture {
            tree,
            scroll,
            target,
            top,
        }
    }

    fn offset(tree: &ViewTree, scroll: ViewId) -> f64 {
        tree.widget::<ScrollContainer>(scroll)
            .map(ScrollContainer::scroll_offset)
            .unwrap_or(f64::NAN)
    }

    fn scroll_to(f: &mut Fixture, view: ViewId) -> Option<Vec2> {
        let path = f.tree.path_to_view(f.scroll, view).unwrap_or_default();
        f.tree.scroll_into_view(f.scroll, &path)
    }

    #[test]
    fn viewport_is_clamped_and_content_unbounded() {
        let f = fixture(0.0);
        assert_eq!(f.tree.content_size(f.scroll), Size::new(100.0, 200.0));
        let scroll_size = f
            .tree
            .widget::<ScrollContainer>(f.scroll)
            .map(ScrollContainer::scroll_size)
            .ok();
        assert_eq!(scroll_size, Some(800.0));
    }

    #[test]
    fn scrolls_target_to_viewport_end() {
        let mut f = fixture(0.0);
        let target = f.target;
        let distance = scroll_to(&mut f, target);
        assert_eq!(distance, Some(Vec2::new(0.0, 750.0)));
        assert_eq!(offset(&f.tree, f.scroll), 750.0);
        assert_eq!(
            f.tree.child_position(f.scroll, f.tree.children(f.scroll)[0].view),
            Some(Point::new(0.0, -750.0))
        );
        let changes: Vec<_> = f.tree.take_changes().into_iter().map(|c| c.property).collect();
        assert_eq!(changes, vec![Property::ScrollOffset]);

        // Already visible: nothing to do.
        assert_eq!(scroll_to(&mut f, target), None);
    }

    #[test]
    fn peeking_leaves_room_after_target() {
        let mut f = fixture(10.0);
        let target = f.target;
        scroll_to(&mut f, target);
        assert_eq!(offset(&f.tree, f.scroll), 760.0);
    }

    #[test]
    fn scrolls_back_to_earlier_views() {
        let mut f = fixture(0.0);
        let target = f.target;
        scroll_to(&mut f, target);
        // `top` is longer than the viewport, so it cannot be brought into view.
        let top = f.top;
        assert_eq!(scroll_to(&mut f, top), None);
        assert_eq!(offset(&f.tree, f.scroll), 750.0);

        f.tree.set_layout(top, LayoutParameters::fixed_size(100.0, 150.0));
        f.tree.measure(f.scroll, Size::new(500.0, 500.0));
        // Content shrank to 250, so the offset clamps to 50.
        assert_eq!(offset(&f.tree, f.scroll), 50.0);
        assert_eq!(scroll_to(&mut f, top), Some(Vec2::new(0.0, -50.0)));
        assert_eq!(offset(&f.tree, f.scroll), 0.0);
    }

    #[test]
    fn scroll_with_children_keeps_parent_in_view() {
        let mut f = fixture(0.0);
        let lane = f.tree.children(f.scroll)[0].view;
        // A row holding the target: the row should come into view as a whole.
        let label = f.tree.insert(Spacer::new());
        f.tree.set_layout(label, LayoutParameters::fixed_size(20.0, 20.0));
        let row = f.tree.insert(Lane::with_children(Orientation::Vertical, [label]));
        f.tree.set_padding(row, Edges::symmetric(0, 15));
        f.tree.set_scroll_with_children(row, Some(Orientation::Vertical));
        if let Ok(lane) = f.tree.widget_mut::<Lane>(lane) {
            lane.push_child(row);
        }
        f.tree.measure(f.scroll, Size::new(500.0, 500.0));
        // Row spans 1000..1050; the label 1015..1035.
        let distance = scroll_to(&mut f, label);
        assert_eq!(distance, Some(Vec2::new(0.0, 850.0)));
        assert_eq!(offset(&f.tree, f.scroll), 850.0);
    }

    #[test]
    fn step_scrolling_is_clamped() {
        let mut f = fixture(0.0);
        let scroll = f.scroll;
        let Ok(widget) = f.tree.widget_mut::<ScrollContainer>(scroll) else {
            panic!("scroll container missing");
        };
        assert!(!widget.scroll_backward());
        assert!(widget.scroll_forward());
        assert_eq!(widget.scroll_offset(), 32.0);
        assert!(widget.set_scroll_offset(5000.0));
        assert_eq!(widget.scroll_offset(), 800.0);
        assert!(!widget.scroll_forward());

        f.tree.update(scroll, Duration::ZERO);
        let changes: Vec<_> = f.tree.take_changes().into_iter().map(|c| c.property).collect();
        assert_eq!(changes, vec![Property::ScrollOffset]);
        f.tree.update(scroll, Duration::ZERO);
        assert!(f.tree.take_changes().is_empty());
    }

    #[test]
    fn draws_clipped_and_offset() {
        use crate::surface::{DrawOp, DrawRecorder, SpriteId};
        use crate::widgets::Frame;

        let mut tree = ViewTree::new();
        let mut frame = Frame::new();
        frame.set_background(Some(SpriteId(3)));
        let content = tree.insert(frame);
        tree.set_layout(content, LayoutParameters::fixed_size(50.0, 300.0));
        let scroll = tree.insert(ScrollContainer::with_content(content));
        tree.set_layout(scroll, LayoutParameters::fixed_size(50.0, 100.0));
        tree.measure(scroll, Size::new(500.0, 500.0));
        if let Ok(widget) = tree.widget_mut::<ScrollContainer>(scroll) {
            widget.set_scroll_offset(40.0);
        }
        let mut surface = DrawRecorder::new();
        tree.draw(scroll, &mut surface);
        assert_eq!(
            surface.ops(),
            &[DrawOp::Sprite {
                sprite: SpriteId(3),
                dest: Rect::new(0.0, -40.0, 50.0, 260.0),
                clip: Some(Rect::new(0.0, 0.0, 50.0, 100.0)),
            }]
        );
    }
}
