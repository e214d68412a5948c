// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontally scrolling content.

use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use trellis_layout::{DirtyTracker, Direction};

use crate::child::{FocusSearchResult, ViewChild};
use crate::widget::{DrawCx, LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// Scrolls its content from right to left in an endless loop.
///
/// The content is measured with unbounded width and drawn twice, the second
/// copy trailing the first by [`Marquee::extra_distance`], so that one copy
/// enters as the other leaves. Both are clipped to the marquee's bounds.
#[derive(Debug)]
pub struct Marquee {
    content: DirtyTracker<Option<ViewId>>,
    extra_distance: DirtyTracker<f64>,
    speed: DirtyTracker<f64>,
    child: Option<ViewChild>,
    /// Content width plus extra distance; zero while stopped.
    scroll_width: f64,
    progress: f64,
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new()
    }
}

impl Marquee {
    /// Empty marquee moving at 1 px/s with a 100 px gap between copies.
    pub fn new() -> Self {
        Self {
            content: DirtyTracker::new(None),
            extra_distance: DirtyTracker::new(100.0),
            speed: DirtyTracker::new(1.0),
            child: None,
            scroll_width: 0.0,
            progress: 0.0,
        }
    }

    /// Marquee scrolling `content`.
    pub fn with_content(content: ViewId) -> Self {
        Self {
            content: DirtyTracker::new(Some(content)),
            ..Self::new()
        }
    }

    /// The scrolling view.
    pub fn content(&self) -> Option<ViewId> {
        *self.content
    }

    /// Replace the scrolling view.
    pub fn set_content(&mut self, content: Option<ViewId>) {
        self.content.set(content);
    }

    /// Gap between the end of one copy and the start of the next.
    pub fn extra_distance(&self) -> f64 {
        *self.extra_distance
    }

    /// Set the gap between copies.
    pub fn set_extra_distance(&mut self, distance: f64) {
        self.extra_distance.set(distance);
    }

    /// Scroll speed in pixels per second.
    pub fn speed(&self) -> f64 {
        *self.speed
    }

    /// Set the scroll speed. Zero stops the loop.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed.set(speed);
    }

    /// Current scroll distance, in `[0, content width + extra distance)`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn restart(&mut self, content_width: Option<f64>) {
        match content_width {
            Some(width) if *self.speed != 0.0 => {
                self.scroll_width = width + *self.extra_distance;
                // Keep the current position across relayouts.
                self.progress = wrap(self.progress, self.scroll_width);
            }
            _ => {
                self.scroll_width = 0.0;
                self.progress = 0.0;
            }
        }
    }
}

fn wrap(value: f64, period: f64) -> f64 {
    if period > 0.0 { value.rem_euclid(period) } else { 0.0 }
}

impl Widget for Marquee {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout = cx.layout();
        let content = (*self.content).filter(|&content| cx.is_alive(content));
        let outer = content.map(|content| {
            let mut limits = layout.limits(available);
            limits.width = f64::INFINITY;
            cx.measure(content, limits);
            cx.outer_size(content)
        });
        self.child = content.map(|content| ViewChild::new(content, Point::ZERO));
        self.restart(outer.map(|outer| outer.width));
        layout.resolve(available, || outer.unwrap_or(Size::ZERO))
    }

    fn draw_content(&self, cx: &mut DrawCx<'_>) {
        let Some(child) = self.child else {
            return;
        };
        let content_width = cx.tree().outer_size(child.view).width;
        let bounds = Rect::from_origin_size(Point::ZERO, cx.outer_size());
        cx.surface().save();
        cx.surface().clip(bounds);
        cx.surface().translate(Vec2::new(-self.progress, 0.0));
        cx.draw_child(child);
        cx.surface()
            .translate(Vec2::new(content_width + *self.extra_distance, 0.0));
        cx.draw_child(child);
        cx.surface().restore();
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
        self.content.is_dirty()
            || self.extra_distance.is_dirty()
            || self.speed.is_dirty()
            || (*self.content).is_some_and(|content| tree.is_dirty(content))
    }

    fn reset_dirty(&mut self) {
        self.content.reset_dirty();
        self.extra_distance.reset_dirty();
        self.speed.reset_dirty();
    }

    fn update(&mut self, _tree: &mut ViewTree, _this: ViewId, elapsed: Duration) {
        if self.scroll_width <= 0.0 {
            return;
        }
        let advanced = self.progress + *self.speed * elapsed.as_secs_f64();
        self.progress = wrap(advanced, self.scroll_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, DrawRecorder, SpriteId};
    use crate::widgets::Frame;
    use trellis_layout::LayoutParameters;

    fn marquee(tree: &mut ViewTree) -> (ViewId, ViewId) {
        let mut frame = Frame::new();
        frame.set_background(Some(SpriteId(1)));
        let content = tree.insert(frame);
        tree.set_layout(content, LayoutParameters::fixed_size(50.0, 10.0));
        let mut widget = Marquee::with_content(content);
        widget.set_speed(10.0);
        let marquee = tree.insert(widget);
        tree.set_layout(marquee, LayoutParameters::fixed_size(40.0, 10.0));
        tree.measure(marquee, Size::new(100.0, 100.0));
        (marquee, content)
    }

    fn progress(tree: &ViewTree, marquee: ViewId) -> f64 {
        tree.widget::<Marquee>(marquee)
            .map(Marquee::progress)
            .unwrap_or(f64::NAN)
    }

    #[test]
    fn content_is_measured_unbounded() {
        let mut tree = ViewTree::new();
        let (marquee, content) = marquee(&mut tree);
        assert_eq!(tree.outer_size(content), Size::new(50.0, 10.0));
        assert_eq!(tree.content_size(marquee), Size::new(40.0, 10.0));
    }

    #[test]
    fn update_advances_and_loops() {
        let mut tree = ViewTree::new();
        let (marquee, _) = marquee(&mut tree);
        tree.update(marquee, Duration::from_secs(3));
        assert_eq!(progress(&tree, marquee), 30.0);
        // Loop length is 50 + 100.
        tree.update(marquee, Duration::from_secs(16));
        assert_eq!(progress(&tree, marquee), 40.0);
    }

    #[test]
    fn zero_speed_resets() {
        let mut tree = ViewTree::new();
        let (marquee, _) = marquee(&mut tree);
        tree.update(marquee, Duration::from_secs(3));
        if let Ok(widget) = tree.widget_mut::<Marquee>(marquee) {
            widget.set_speed(0.0);
        }
        tree.measure(marquee, Size::new(100.0, 100.0));
        assert_eq!(progress(&tree, marquee), 0.0);
        tree.update(marquee, Duration::from_secs(3));
        assert_eq!(progress(&tree, marquee), 0.0);
    }

    #[test]
    fn draws_two_clipped_copies() {
        let mut tree = ViewTree::new();
        let (marquee, _) = marquee(&mut tree);
        tree.update(marquee, Duration::from_secs(3));
        let mut surface = DrawRecorder::new();
        tree.draw(marquee, &mut surface);
        let clip = Some(Rect::new(0.0, 0.0, 40.0, 10.0));
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Sprite {
                    sprite: SpriteId(1),
                    dest: Rect::new(-30.0, 0.0, 20.0, 10.0),
                    clip,
                },
                DrawOp::Sprite {
                    sprite: SpriteId(1),
                    dest: Rect::new(120.0, 0.0, 170.0, 10.0),
                    clip,
                },
            ]
        );
        assert_eq!(surface.depth(), 0);
    }
}
