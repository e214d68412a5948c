// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layout: value types for retained-mode view layout.
//!
//! These are the leaves that `trellis_view` builds on. None of them know about
//! views; they describe sizes, insets and change tracking.
//!
//! - [`Length`] and [`LayoutParameters`]: per-axis sizing rules (fixed pixels,
//!   percentage, stretch, or fit content) with optional min/max limits.
//! - [`Edges`]: integer insets used for margin, border and padding.
//! - [`Bounds`]: origin-plus-size rectangles with a canonical empty value.
//! - [`Alignment`], [`Orientation`], [`Direction`], [`Visibility`].
//! - [`GridItemLayout`]: uniform grid cell sizing.
//! - [`FloatingPosition`]: placement of out-of-flow views next to their parent.
//! - [`DirtyTracker`] and [`DirtyTrackingList`]: change detection that only
//!   reports real changes, so repeated writes of equal values never force a
//!   new layout.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use trellis_layout::{LayoutParameters, Length};
//!
//! let layout = LayoutParameters {
//!     width: Length::Percent(50.0),
//!     height: Length::Content,
//!     max_height: Some(30.0),
//!     ..LayoutParameters::default()
//! };
//!
//! // Width comes from the available space, height from the content (then clamped).
//! let size = layout.resolve(Size::new(200.0, 200.0), || Size::new(10.0, 80.0));
//! assert_eq!(size, Size::new(100.0, 30.0));
//! ```
//!
//! Sizes are in `f64` pixels using [`kurbo`] types.

mod axis;
mod bounds;
mod dirty;
mod edges;
mod floating;
mod grid;
mod length;

pub use axis::{Alignment, Axes, Direction, Orientation, Visibility};
pub use bounds::Bounds;
pub use dirty::{DirtyTracker, DirtyTrackingList};
pub use edges::{Edges, ParseEdgesError};
pub use floating::FloatingPosition;
pub use grid::GridItemLayout;
pub use length::{LayoutParameters, Length, ParseLengthError};
