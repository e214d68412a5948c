// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis View: a retained-mode view tree with dirty-checked layout, pointer
//! dispatch and directional focus search.
//!
//! Views live in a [`ViewTree`] arena and are addressed by generational
//! [`ViewId`]s. Each view is a [`ViewCore`] (layout parameters, margin,
//! padding, visibility, flags, floating elements) plus a boxed [`Widget`] that
//! supplies the type-specific parts: how content is measured and drawn, which
//! children exist and where, and how focus moves between them.
//!
//! - Layout: [`ViewTree::measure`] re-lays out a view only when it or a
//!   descendant is dirty, or when the available size changed. Containers in
//!   [`widgets`] position their children during that pass.
//! - Drawing: [`ViewTree::draw`] emits to any [`Surface`]. [`DrawRecorder`]
//!   records the primitives in absolute coordinates for tests and tooling.
//! - Input: `dispatch_*` methods route pointer events from a root down to the
//!   views under the pointer, then run [`Handlers`] bottom-up until one
//!   returns [`Outcome::Stop`].
//! - Focus: [`ViewTree::focus_search`] finds the next focusable view in a
//!   [`Direction`] from a position; [`ViewTree::scroll_into_view`] brings a
//!   found path into view inside scroll containers.
//! - Change tracking: with [`ViewTreeConfig::record_changes`] enabled, setters
//!   queue [`PropertyChange`]s drained by [`ViewTree::take_changes`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_view::widgets::{Lane, Spacer};
//! use trellis_view::{
//!     Button, ClickEvent, Direction, LayoutParameters, Orientation, Outcome, ViewTree,
//! };
//!
//! let mut tree = ViewTree::new();
//! let ok = tree.insert(Spacer::new());
//! let cancel = tree.insert(Spacer::new());
//! for button in [ok, cancel] {
//!     tree.set_layout(button, LayoutParameters::fixed_size(40.0, 20.0));
//!     tree.set_focusable(button, true);
//! }
//! let row = tree.insert(Lane::with_children(Orientation::Horizontal, [ok, cancel]));
//! tree.measure(row, Size::new(200.0, 100.0));
//!
//! // Moving right from the first button lands on the second.
//! let found = tree.focus_search(row, Point::new(20.0, 10.0), Direction::East);
//! assert_eq!(found.map(|f| f.target.view), Some(cancel));
//!
//! // Clicks reach the view under the pointer.
//! if let Some(handlers) = tree.handlers(cancel) {
//!     handlers.on_click(|_, _, _| Outcome::Stop);
//! }
//! let outcome = tree.dispatch_click(row, ClickEvent::new(Point::new(50.0, 5.0), Button(0)));
//! assert_eq!(outcome, Outcome::Stop);
//! ```
//!
//! The optional `tracing` feature emits spans for layout passes and debug
//! events for focus search and scrolling.

mod child;
mod config;
mod dispatch;
mod error;
mod event;
mod focus;
mod property;
mod state;
mod surface;
mod tags;
mod tree;
mod types;
mod widget;

pub mod widgets;

pub use child::{FocusSearchResult, ViewChild};
pub use config::{Button, ButtonAction, ButtonMap, ViewTreeConfig};
pub use error::ViewError;
pub use event::{
    ButtonEvent, ClickEvent, Handler, Handlers, PointerArgs, PointerEvent, PointerMoveEvent,
    WheelEvent,
};
pub use focus::to_global_positions;
pub use property::{Property, PropertyChange};
pub use state::{FloatingElement, ViewCore};
pub use surface::{DrawOp, DrawRecorder, SpriteId, Surface};
pub use tags::Tags;
pub use tree::ViewTree;
pub use types::{Outcome, ViewFlags, ViewId};
pub use widget::{ChildList, DrawCx, LayoutCx, Widget};

pub use trellis_layout::{
    Alignment, Bounds, Direction, Edges, FloatingPosition, GridItemLayout, LayoutParameters,
    Length, Orientation, Visibility,
};
