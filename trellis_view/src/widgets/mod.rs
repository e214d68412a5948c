// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout containers.
//!
//! Each container is a plain [`Widget`](crate::Widget) that refers to its
//! children by [`ViewId`](crate::ViewId). Insert the children first, then the
//! container:
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_view::widgets::{Lane, Spacer};
//! use trellis_view::{LayoutParameters, Orientation, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let a = tree.insert(Spacer::new());
//! let b = tree.insert(Spacer::new());
//! tree.set_layout(a, LayoutParameters::fixed_size(10.0, 5.0));
//! tree.set_layout(b, LayoutParameters::fixed_size(20.0, 5.0));
//! let lane = tree.insert(Lane::with_children(Orientation::Horizontal, [a, b]));
//!
//! tree.measure(lane, Size::new(100.0, 100.0));
//! assert_eq!(tree.content_size(lane), Size::new(30.0, 5.0));
//! assert_eq!(tree.child_position(lane, b), Some(Point::new(10.0, 0.0)));
//! ```

mod decorator;
mod frame;
mod grid;
mod lane;
mod marquee;
mod panel;
mod scroll;
mod spacer;

pub use decorator::{Decorated, DecoratedProperties, Decorator};
pub use frame::Frame;
pub use grid::Grid;
pub use lane::Lane;
pub use marquee::Marquee;
pub use panel::Panel;
pub use scroll::ScrollContainer;
pub use spacer::Spacer;

/// Signed distance from `position` to the span `[min, max)` along one axis.
///
/// Zero inside the span. Otherwise the offset to whichever end is closer;
/// negative when the span lies after `position`.
pub(crate) fn axis_distance(position: f64, min: f64, max: f64) -> f64 {
    if position >= min && position < max {
        return 0.0;
    }
    let to_min = position - min;
    let to_max = position - max;
    if to_min.abs() < to_max.abs() {
        to_min
    } else {
        to_max
    }
}

#[cfg(test)]
mod tests {
    use super::axis_distance;

    #[test]
    fn axis_distance_keeps_sign() {
        assert_eq!(axis_distance(5.0, 0.0, 10.0), 0.0);
        assert_eq!(axis_distance(-3.0, 0.0, 10.0), -3.0);
        assert_eq!(axis_distance(14.0, 0.0, 10.0), 4.0);
        // Just past the exclusive end.
        assert_eq!(axis_distance(10.0, 0.0, 10.0), 0.0);
        assert_eq!(axis_distance(11.0, 0.0, 10.0), 1.0);
    }
}
