// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view state shared by every widget type.

use kurbo::{Size, Vec2};
use trellis_layout::{DirtyTracker, Edges, FloatingPosition, LayoutParameters, Orientation, Visibility};

use crate::child::ViewChild;
use crate::tags::Tags;
use crate::types::ViewFlags;
use crate::ViewId;

/// A view placed outside the normal layout flow of its parent.
///
/// Floats are measured against the parent's outer size once the parent itself
/// has been measured, then placed according to [`FloatingPosition`]. They take
/// part in hit testing, drawing and focus search, but never affect the
/// parent's own size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingElement {
    /// The floating view.
    pub view: ViewId,
    /// Placement relative to the parent.
    pub position: FloatingPosition,
    pub(crate) offset: Vec2,
}

impl FloatingElement {
    /// Float `view` at `position`. Placement is computed on the next layout.
    pub fn new(view: ViewId, position: FloatingPosition) -> Self {
        Self {
            view,
            position,
            offset: Vec2::ZERO,
        }
    }

    /// Offset from the parent's outer origin, as of the last layout.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// This float as a child of its parent.
    pub fn as_view_child(&self) -> ViewChild {
        ViewChild::new(self.view, self.offset.to_point())
    }
}

/// Layout and interaction state owned by the tree for every view.
///
/// Read through [`ViewTree::core`](crate::ViewTree::core); write through the
/// tree's setters so that dirty tracking and change notifications stay in sync.
#[derive(Debug)]
pub struct ViewCore {
    pub(crate) layout: DirtyTracker<LayoutParameters>,
    pub(crate) margin: DirtyTracker<Edges>,
    pub(crate) padding: DirtyTracker<Edges>,
    pub(crate) content_size: Size,
    pub(crate) visibility: Visibility,
    pub(crate) z_index: i32,
    pub(crate) flags: ViewFlags,
    pub(crate) name: String,
    pub(crate) tooltip: Option<String>,
    pub(crate) tags: Tags,
    pub(crate) scroll_with_children: Option<Orientation>,
    pub(crate) floating: Vec<FloatingElement>,
    pub(crate) last_available_size: Option<Size>,
    pub(crate) children_out_of_bounds: bool,
    pub(crate) dragging_view: Option<ViewId>,
    pub(crate) is_dragging: bool,
    pub(crate) previous_layout_offset: Vec2,
}

impl ViewCore {
    pub(crate) fn new(name: String) -> Self {
        Self {
            layout: DirtyTracker::new(LayoutParameters::default()),
            margin: DirtyTracker::new(Edges::NONE),
            padding: DirtyTracker::new(Edges::NONE),
            content_size: Size::ZERO,
            visibility: Visibility::Visible,
            z_index: 0,
            flags: ViewFlags::default(),
            name,
            tooltip: None,
            tags: Tags::new(),
            scroll_with_children: None,
            floating: Vec::new(),
            last_available_size: None,
            children_out_of_bounds: false,
            dragging_view: None,
            is_dragging: false,
            previous_layout_offset: Vec2::ZERO,
        }
    }

    /// Layout parameters.
    pub fn layout(&self) -> LayoutParameters {
        *self.layout.get()
    }

    /// Margin edges; may be negative.
    pub fn margin(&self) -> Edges {
        *self.margin.get()
    }

    /// Padding edges.
    pub fn padding(&self) -> Edges {
        *self.padding.get()
    }

    /// Content size as of the last measure.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the view is visible.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Z-index among siblings; higher is in front.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Interaction flags.
    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    /// Whether the view itself can take focus.
    pub fn is_focusable(&self) -> bool {
        self.flags.contains(ViewFlags::FOCUSABLE)
    }

    /// Whether the view raises drag events.
    pub fn is_draggable(&self) -> bool {
        self.flags.contains(ViewFlags::DRAGGABLE)
    }

    /// Whether the view receives pointer events.
    pub fn pointer_events_enabled(&self) -> bool {
        self.flags.contains(ViewFlags::POINTER_EVENTS)
    }

    /// Name for debugging and tracing.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tooltip text.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Application data.
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Axis along which a scroll container should keep this view with its
    /// scrolled neighbors.
    pub fn scroll_with_children(&self) -> Option<Orientation> {
        self.scroll_with_children
    }

    /// Floating elements in placement order.
    pub fn floating_elements(&self) -> &[FloatingElement] {
        &self.floating
    }

    /// Whether a descendant draws outside of its parent's bounds.
    pub fn has_children_out_of_bounds(&self) -> bool {
        self.children_out_of_bounds
    }

    /// Whether a drag started on this view and has not yet been dropped.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub(crate) fn is_base_dirty(&self) -> bool {
        self.layout.is_dirty() || self.margin.is_dirty() || self.padding.is_dirty()
    }

    pub(crate) fn reset_dirty(&mut self) {
        self.layout.reset_dirty();
        self.margin.reset_dirty();
        self.padding.reset_dirty();
    }
}
