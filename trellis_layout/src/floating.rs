// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of out-of-flow views relative to their parent.

use kurbo::{Size, Vec2};

/// Where a floating view sits relative to the view it is attached to.
///
/// Offsets are measured from the parent's outer top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FloatingPosition {
    /// Directly above the parent, left-aligned.
    AboveParent,
    /// Directly to the right of the parent, top-aligned.
    AfterParent,
    /// Directly to the left of the parent, top-aligned.
    BeforeParent,
    /// Directly below the parent, left-aligned.
    BelowParent,
    /// A fixed offset.
    Offset(Vec2),
}

impl FloatingPosition {
    /// Offset for a floating view of `view_size` attached to a parent of `parent_size`.
    pub fn offset(&self, view_size: Size, parent_size: Size) -> Vec2 {
        match *self {
            Self::AboveParent => Vec2::new(0.0, -view_size.height),
            Self::AfterParent => Vec2::new(parent_size.width, 0.0),
            Self::BeforeParent => Vec2::new(-view_size.width, 0.0),
            Self::BelowParent => Vec2::new(0.0, parent_size.height),
            Self::Offset(offset) => offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_offsets() {
        let view = Size::new(10.0, 4.0);
        let parent = Size::new(50.0, 20.0);
        assert_eq!(
            FloatingPosition::AboveParent.offset(view, parent),
            Vec2::new(0.0, -4.0)
        );
        assert_eq!(
            FloatingPosition::AfterParent.offset(view, parent),
            Vec2::new(50.0, 0.0)
        );
        assert_eq!(
            FloatingPosition::BeforeParent.offset(view, parent),
            Vec2::new(-10.0, 0.0)
        );
        assert_eq!(
            FloatingPosition::BelowParent.offset(view, parent),
            Vec2::new(0.0, 20.0)
        );
        assert_eq!(
            FloatingPosition::Offset(Vec2::new(3.0, 3.0)).offset(view, parent),
            Vec2::new(3.0, 3.0)
        );
    }
}
