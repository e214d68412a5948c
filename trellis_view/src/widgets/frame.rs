// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single child inside a border and background.

use kurbo::{Point, Rect, Size};
use trellis_layout::{Alignment, DirtyTracker, Direction, Edges};

use crate::child::{FocusSearchResult, ViewChild};
use crate::surface::SpriteId;
use crate::widget::{DrawCx, LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// Wraps one content view with a border and a background.
///
/// The background fills the inner area (content plus padding) and the border
/// sprite covers the whole border box, so its [`Frame::border_thickness`]
/// should match the sprite's edges.
#[derive(Debug)]
pub struct Frame {
    content: DirtyTracker<Option<ViewId>>,
    border_thickness: DirtyTracker<Edges>,
    horizontal_content_alignment: DirtyTracker<Alignment>,
    vertical_content_alignment: DirtyTracker<Alignment>,
    background: Option<SpriteId>,
    border: Option<SpriteId>,
    child: Option<ViewChild>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Frame without content, border or background.
    pub fn new() -> Self {
        Self {
            content: DirtyTracker::new(None),
            border_thickness: DirtyTracker::new(Edges::NONE),
            horizontal_content_alignment: DirtyTracker::new(Alignment::Start),
            vertical_content_alignment: DirtyTracker::new(Alignment::Start),
            background: None,
            border: None,
            child: None,
        }
    }

    /// Frame around `content`.
    pub fn with_content(content: ViewId) -> Self {
        Self {
            content: DirtyTracker::new(Some(content)),
            ..Self::new()
        }
    }

    /// The framed view.
    pub fn content(&self) -> Option<ViewId> {
        *self.content
    }

    /// Replace the framed view. The previous one stays in the tree.
    pub fn set_content(&mut self, content: Option<ViewId>) {
        self.content.set(content);
    }

    /// Set the thickness of the border.
    pub fn set_border_thickness(&mut self, thickness: Edges) {
        self.border_thickness.set(thickness);
    }

    /// Horizontal placement of content smaller than the frame.
    pub fn horizontal_content_alignment(&self) -> Alignment {
        *self.horizontal_content_alignment
    }

    /// Set the horizontal placement of the content.
    pub fn set_horizontal_content_alignment(&mut self, alignment: Alignment) {
        self.horizontal_content_alignment.set(alignment);
    }

    /// Vertical placement of content smaller than the frame.
    pub fn vertical_content_alignment(&self) -> Alignment {
        *self.vertical_content_alignment
    }

    /// Set the vertical placement of the content.
    pub fn set_vertical_content_alignment(&mut self, alignment: Alignment) {
        self.vertical_content_alignment.set(alignment);
    }

    /// Background sprite.
    pub fn background(&self) -> Option<SpriteId> {
        self.background
    }

    /// Set the background sprite. Drawing only; layout is unaffected.
    pub fn set_background(&mut self, background: Option<SpriteId>) {
        self.background = background;
    }

    /// Border sprite.
    pub fn border(&self) -> Option<SpriteId> {
        self.border
    }

    /// Set the border sprite. Drawing only; layout is unaffected.
    pub fn set_border(&mut self, border: Option<SpriteId>) {
        self.border = border;
    }
}

impl Widget for Frame {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout = cx.layout();
        let content = (*self.content).filter(|&content| cx.is_alive(content));
        let Some(content) = content else {
            self.child = None;
            return layout.resolve(available, || Size::ZERO);
        };
        cx.measure(content, layout.limits(available));
        let outer = cx.outer_size(content);
        let content_size = layout.resolve(available, || outer);
        let position = if outer == content_size {
            Point::ZERO
        } else {
            Point::new(
                self.horizontal_content_alignment
                    .align(outer.width, content_size.width),
                self.vertical_content_alignment
                    .align(outer.height, content_size.height),
            )
        };
        self.child = Some(ViewChild::new(content, position));
        content_size
    }

    fn draw_border(&self, cx: &mut DrawCx<'_>) {
        let view = cx.view();
        if let Some(background) = self.background {
            let inner = cx.tree().inner_size(view);
            let surface = cx.surface();
            surface.save();
            surface.translate(self.border_thickness.top_left());
            surface.draw_sprite(background, Rect::from_origin_size(Point::ZERO, inner));
            surface.restore();
        }
        if let Some(border) = self.border {
            let size = cx.tree().border_size(view);
            cx.surface()
                .draw_sprite(border, Rect::from_origin_size(Point::ZERO, size));
        }
    }

    fn border_thickness(&self) -> Edges {
        *self.border_thickness
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
            || self.border_thickness.is_dirty()
            || self.horizontal_content_alignment.is_dirty()
            || self.vertical_content_alignment.is_dirty()
            || (*self.content).is_some_and(|content| tree.is_dirty(content))
    }

    fn reset_dirty(&mut self) {
        self.content.reset_dirty();
        self.border_thickness.reset_dirty();
        self.horizontal_content_alignment.reset_dirty();
        self.vertical_content_alignment.reset_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, DrawRecorder};
    use crate::widgets::Spacer;
    use trellis_layout::LayoutParameters;

    fn framed(tree: &mut ViewTree) -> (ViewId, ViewId) {
        let content = tree.insert(Spacer::new());
        tree.set_layout(content, LayoutParameters::fixed_size(10.0, 10.0));
        tree.set_focusable(content, true);
        let mut frame = Frame::with_content(content);
        frame.set_border_thickness(Edges::all(2));
        frame.set_horizontal_content_alignment(Alignment::Middle);
        frame.set_vertical_content_alignment(Alignment::Middle);
        frame.set_background(Some(SpriteId(7)));
        frame.set_border(Some(SpriteId(8)));
        let frame = tree.insert(frame);
        tree.set_layout(frame, LayoutParameters::fixed_size(20.0, 20.0));
        tree.measure(frame, Size::new(100.0, 100.0));
        (frame, content)
    }

    #[test]
    fn border_adds_to_size_and_content_is_aligned() {
        let mut tree = ViewTree::new();
        let (frame, content) = framed(&mut tree);
        assert_eq!(tree.outer_size(frame), Size::new(24.0, 24.0));
        assert_eq!(tree.child_position(frame, content), Some(Point::new(7.0, 7.0)));
    }

    #[test]
    fn draws_background_inside_border() {
        let mut tree = ViewTree::new();
        let (frame, _) = framed(&mut tree);
        tree.set_padding(frame, Edges::all(1));
        tree.measure(frame, Size::new(100.0, 100.0));
        let mut surface = DrawRecorder::new();
        tree.draw(frame, &mut surface);
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Sprite {
                    sprite: SpriteId(7),
                    dest: Rect::new(2.0, 2.0, 24.0, 24.0),
                    clip: None,
                },
                DrawOp::Sprite {
                    sprite: SpriteId(8),
                    dest: Rect::new(0.0, 0.0, 26.0, 26.0),
                    clip: None,
                },
            ]
        );
    }

    #[test]
    fn focus_reaches_aligned_content() {
        let mut tree = ViewTree::new();
        let (frame, content) = framed(&mut tree);
        let found = tree.focus_search(frame, Point::new(-5.0, 12.0), Direction::East);
        assert_eq!(found.as_ref().map(|f| f.target.view), Some(content));
        assert_eq!(
            found.map(|f| f.global_target_position()),
            Some(Point::new(7.0, 7.0))
        );
    }

    #[test]
    fn empty_frame_measures_to_layout() {
        let mut tree = ViewTree::new();
        let frame = tree.insert(Frame::new());
        tree.measure(frame, Size::new(100.0, 100.0));
        assert_eq!(tree.content_size(frame), Size::ZERO);
        assert!(tree.children(frame).is_empty());
    }
}
