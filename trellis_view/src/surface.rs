// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing abstraction consumed by [`ViewTree::draw`](crate::ViewTree::draw).
//!
//! Views never inspect the surface; they only push and pop transform state and
//! issue primitive draws. Hosts adapt this to their renderer. [`DrawRecorder`]
//! is a simple in-memory implementation useful for tests and debugging.

use kurbo::{Point, Rect, Vec2};

/// Opaque handle to a host sprite.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SpriteId(pub u32);

/// Target of draw calls.
///
/// Every [`Surface::save`] is matched by exactly one [`Surface::restore`].
/// Translation and clipping are relative to the current (saved) state.
pub trait Surface {
    /// Push the current translation and clip.
    fn save(&mut self);
    /// Pop back to the state of the matching [`Surface::save`].
    fn restore(&mut self);
    /// Move the origin by `offset`.
    fn translate(&mut self, offset: Vec2);
    /// Intersect the clip with `rect`, in current local coordinates.
    fn clip(&mut self, rect: Rect);
    /// Draw `sprite` stretched into `dest`.
    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect);
    /// Draw `text` with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point);
}

/// A primitive recorded by [`DrawRecorder`], in absolute coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A sprite draw.
    Sprite {
        /// Sprite handle.
        sprite: SpriteId,
        /// Absolute destination rectangle.
        dest: Rect,
        /// Absolute clip in effect, if any.
        clip: Option<Rect>,
    },
    /// A text draw.
    Text {
        /// Text content.
        text: String,
        /// Absolute top-left position.
        position: Point,
        /// Absolute clip in effect, if any.
        clip: Option<Rect>,
    },
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct State {
    origin: Vec2,
    clip: Option<Rect>,
}

/// [`Surface`] that records draw calls with their absolute placement.
#[derive(Clone, Debug, Default)]
pub struct DrawRecorder {
    state: State,
    stack: Vec<State>,
    ops: Vec<DrawOp>,
}

impl DrawRecorder {
    /// Empty recorder with an identity transform and no clip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded primitives in draw order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Current absolute origin.
    pub fn origin(&self) -> Point {
        self.state.origin.to_point()
    }

    /// Depth of the save stack; zero when saves and restores are balanced.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for DrawRecorder {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.origin += offset;
    }

    fn clip(&mut self, rect: Rect) {
        let rect = rect + self.state.origin;
        self.state.clip = Some(match self.state.clip {
            Some(current) => current.intersect(rect),
            None => rect,
        });
    }

    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect) {
        self.ops.push(DrawOp::Sprite {
            sprite,
            dest: dest + self.state.origin,
            clip: self.state.clip,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            position: position + self.state.origin,
            clip: self.state.clip,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_absolute_positions_and_clips() {
        let mut surface = DrawRecorder::new();
        surface.translate(Vec2::new(10.0, 10.0));
        surface.save();
        surface.translate(Vec2::new(5.0, 0.0));
        surface.clip(Rect::new(0.0, 0.0, 20.0, 20.0));
        surface.draw_text("hi", Point::new(1.0, 1.0));
        surface.restore();
        surface.draw_sprite(SpriteId(3), Rect::new(0.0, 0.0, 4.0, 4.0));

        assert_eq!(surface.depth(), 0);
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Text {
                    text: "hi".into(),
                    position: Point::new(16.0, 11.0),
                    clip: Some(Rect::new(15.0, 10.0, 35.0, 30.0)),
                },
                DrawOp::Sprite {
                    sprite: SpriteId(3),
                    dest: Rect::new(10.0, 10.0, 14.0, 14.0),
                    clip: None,
                },
            ]
        );
    }
}
