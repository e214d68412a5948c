// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-oriented enums: orientation, cardinal direction, alignment and visibility.

use kurbo::{Point, Size, Vec2};

use crate::LayoutParameters;
use crate::length::Length;

/// Two-component values that can be read and written along an [`Orientation`].
///
/// Implemented for the kurbo types used throughout layout so that containers can
/// write orientation-agnostic code (`orientation.get(size)` instead of matching on
/// width/height at every call site).
pub trait Axes: Copy {
    /// Component along `orientation`.
    fn along(&self, orientation: Orientation) -> f64;
    /// Replace the component along `orientation`.
    fn set_along(&mut self, orientation: Orientation, value: f64);
}

impl Axes for Size {
    fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    fn set_along(&mut self, orientation: Orientation, value: f64) {
        match orientation {
            Orientation::Horizontal => self.width = value,
            Orientation::Vertical => self.height = value,
        }
    }
}

impl Axes for Vec2 {
    fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    fn set_along(&mut self, orientation: Orientation, value: f64) {
        match orientation {
            Orientation::Horizontal => self.x = value,
            Orientation::Vertical => self.y = value,
        }
    }
}

impl Axes for Point {
    fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    fn set_along(&mut self, orientation: Orientation, value: f64) {
        match orientation {
            Orientation::Horizontal => self.x = value,
            Orientation::Vertical => self.y = value,
        }
    }
}

/// Layout axis of a container.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Orientation {
    /// Read the component of `value` along this orientation.
    pub fn get<T: Axes>(self, value: T) -> f64 {
        value.along(self)
    }

    /// Write the component of `value` along this orientation.
    pub fn set<T: Axes>(self, value: &mut T, length: f64) {
        value.set_along(self, length);
    }

    /// Replace the component along this orientation with `f(component)`.
    pub fn update<T: Axes>(self, value: &mut T, f: impl FnOnce(f64) -> f64) {
        let current = value.along(self);
        value.set_along(self, f(current));
    }

    /// The perpendicular orientation.
    #[must_use]
    pub fn swap(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// A vector of `length` along this orientation and zero on the other axis.
    pub fn create_vector(self, length: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(length, 0.0),
            Self::Vertical => Vec2::new(0.0, length),
        }
    }

    /// The sizing rule of `layout` along this orientation.
    pub fn length(self, layout: &LayoutParameters) -> Length {
        match self {
            Self::Horizontal => layout.width,
            Self::Vertical => layout.height,
        }
    }
}

/// Cardinal direction used for focus navigation.
///
/// North and West are the "reverse" directions: they move towards smaller
/// coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Up.
    North,
    /// Right.
    East,
    /// Down.
    South,
    /// Left.
    West,
}

impl Direction {
    /// Axis that this direction moves along.
    pub fn orientation(self) -> Orientation {
        match self {
            Self::East | Self::West => Orientation::Horizontal,
            Self::North | Self::South => Orientation::Vertical,
        }
    }

    /// Whether the direction moves towards smaller coordinates.
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::North | Self::West)
    }

    /// Whether the direction is East or West.
    pub fn is_horizontal(self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    /// Whether the direction is North or South.
    pub fn is_vertical(self) -> bool {
        self.orientation() == Orientation::Vertical
    }
}

/// Placement of content inside a larger axis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Alignment {
    /// Left or top.
    #[default]
    Start,
    /// Centered.
    Middle,
    /// Right or bottom.
    End,
}

impl Alignment {
    /// Offset at which content of length `content` starts inside `axis`.
    ///
    /// The result is negative when the content overflows and the alignment is
    /// not [`Alignment::Start`].
    pub fn align(self, content: f64, axis: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Middle => (axis - content) / 2.0,
            Self::End => axis - content,
        }
    }
}

/// Whether a view is drawn and participates in hit testing and focus.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Visibility {
    /// Drawn and interactive.
    #[default]
    Visible,
    /// Still takes up layout space, but is neither drawn nor interactive.
    Hidden,
}
