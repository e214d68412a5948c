// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounds expressed as an origin plus a size.

use kurbo::{Point, Rect, Size, Vec2};

/// Axis-aligned rectangle stored as origin and size.
///
/// Unlike [`Rect`], the empty intersection is a single canonical value
/// ([`Bounds::EMPTY`]), which makes `a.intersection(b) == b` a usable
/// containment test.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Top-left corner.
    pub origin: Point,
    /// Width and height.
    pub size: Size,
}

impl Bounds {
    /// Zero-sized bounds at the origin.
    pub const EMPTY: Self = Self {
        origin: Point::ORIGIN,
        size: Size::ZERO,
    };

    /// Bounds with the given origin and size.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Bounds from the left, top, right and bottom coordinates.
    ///
    /// The stored size never places the right or bottom edge inside the
    /// requested one, so a union always contains both of its inputs.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            Point::new(left, top),
            Size::new(span(left, right), span(top, bottom)),
        )
    }

    /// Leftmost x coordinate.
    pub fn left(&self) -> f64 {
        self.origin.x
    }

    /// Topmost y coordinate.
    pub fn top(&self) -> f64 {
        self.origin.y
    }

    /// Exclusive right x coordinate.
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Exclusive bottom y coordinate.
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.origin + self.size.to_vec2() / 2.0
    }

    /// Whether `point` lies inside; the right and bottom edges are exclusive.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Whether `other` lies completely inside these bounds. Shared edges count
    /// as inside.
    pub fn contains_bounds(&self, other: Self) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlapping region, or [`Bounds::EMPTY`] if the two do not overlap.
    #[must_use]
    pub fn intersection(&self, other: Self) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Self::EMPTY;
        }
        Self::from_edges(left, top, right, bottom)
    }

    /// Whether the interiors of the two bounds overlap.
    pub fn intersects_with(&self, other: Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Smallest bounds containing both.
    #[must_use]
    pub fn union(&self, other: Self) -> Self {
        Self::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Same size, moved by `distance`.
    #[must_use]
    pub fn offset(&self, distance: Vec2) -> Self {
        Self::new(self.origin + distance, self.size)
    }

    /// Equivalent kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Distance from `near` to `far`, rounded up by one step when `near + distance`
/// would fall short of `far`.
fn span(near: f64, far: f64) -> f64 {
    let distance = far - near;
    if near + distance < far {
        distance.next_up()
    } else {
        distance
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self::new(rect.origin(), rect.size())
    }
}
