// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view arena: identity, properties, geometry, layout and drawing.

use core::any::{Any, type_name};
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Size, Vec2};
use trellis_layout::{Bounds, Edges, FloatingPosition, LayoutParameters, Orientation, Visibility};

use crate::child::ViewChild;
use crate::config::ViewTreeConfig;
use crate::error::ViewError;
use crate::event::Handlers;
use crate::property::{Property, PropertyChange};
use crate::state::{FloatingElement, ViewCore};
use crate::surface::Surface;
use crate::tags::Tags;
use crate::types::{ViewFlags, ViewId};
use crate::widget::{ChildList, DrawCx, LayoutCx, Widget};

/// Owner of every view and the entry point for all per-view operations.
///
/// Views are created with [`ViewTree::insert`], which returns a generational
/// [`ViewId`]. Containers refer to their children by id, so the tree is the
/// only owner; removing a view removes its subtree. Operations that take an id
/// treat a stale id as an empty view: getters return defaults, setters do
/// nothing and queries return `None`.
///
/// While one of a widget's own hooks runs (measure, update, scroll into view)
/// the widget is checked out of the tree. Typed access to it from inside that
/// hook reports [`ViewError::Busy`].
///
/// ## Example
///
/// ```rust
/// use kurbo::Size;
/// use trellis_view::{LayoutParameters, ViewTree, widgets::Spacer};
///
/// let mut tree = ViewTree::new();
/// let spacer = tree.insert(Spacer::new());
/// tree.set_layout(spacer, LayoutParameters::fixed_size(40.0, 10.0));
///
/// assert!(tree.measure(spacer, Size::new(100.0, 100.0)));
/// assert_eq!(tree.outer_size(spacer), Size::new(40.0, 10.0));
/// // Nothing changed, so the second pass is skipped.
/// assert!(!tree.measure(spacer, Size::new(100.0, 100.0)));
/// ```
#[derive(Default)]
pub struct ViewTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    config: ViewTreeConfig,
    changes: Vec<PropertyChange>,
}

impl fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("ViewTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("config", &self.config)
            .field("pending_changes", &self.changes.len())
            .finish_non_exhaustive()
    }
}

pub(crate) struct Node {
    generation: u32,
    pub(crate) core: ViewCore,
    pub(crate) widget: Option<Box<dyn Widget>>,
    pub(crate) handlers: Handlers,
}

impl Node {
    fn new(generation: u32, name: String, widget: Box<dyn Widget>) -> Self {
        Self {
            generation,
            core: ViewCore::new(name),
            widget: Some(widget),
            handlers: Handlers::default(),
        }
    }
}

fn short_type_name<W>() -> String {
    let full = type_name::<W>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_owned()
}

impl ViewTree {
    /// Empty tree with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tree with `config`.
    pub fn with_config(config: ViewTreeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Tree-wide configuration.
    pub fn config(&self) -> &ViewTreeConfig {
        &self.config
    }

    /// Mutable tree-wide configuration.
    pub fn config_mut(&mut self) -> &mut ViewTreeConfig {
        &mut self.config
    }

    /// Add a view backed by `widget`. The view starts unattached; make it a
    /// child by handing the id to a container.
    ///
    /// The view's name defaults to the widget's type name.
    pub fn insert<W: Widget>(&mut self, widget: W) -> ViewId {
        let name = short_type_name::<W>();
        let widget: Box<dyn Widget> = Box::new(widget);
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, name, widget));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, name, widget)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId stores 32-bit slot indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        ViewId::new(idx, generation)
    }

    /// Remove a view, its floating elements and every view its widget owns.
    ///
    /// Containers that still list the id skip it from then on. Removing a view
    /// from inside one of its own widget hooks removes only the view itself.
    pub fn remove(&mut self, id: ViewId) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        let mut owned = node
            .widget
            .as_deref()
            .map(Widget::owned_views)
            .unwrap_or_default();
        owned.extend(node.core.floating.iter().map(|float| float.view));
        if let Some(slot) = self.nodes.get_mut(id.idx()) {
            *slot = None;
        }
        self.free_list.push(id.idx());
        for child in owned {
            self.remove(child);
        }
    }

    /// Returns true if `id` refers to a live view.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.node(id).is_some()
    }

    /// Shared state of a live view.
    pub fn core(&self, id: ViewId) -> Option<&ViewCore> {
        self.node(id).map(|node| &node.core)
    }

    /// Typed access to a view's widget.
    pub fn widget<W: Widget>(&self, id: ViewId) -> Result<&W, ViewError> {
        let node = self.node(id).ok_or(ViewError::Stale(id))?;
        let widget: &dyn Widget = node.widget.as_deref().ok_or(ViewError::Busy(id))?;
        let widget: &dyn Any = widget;
        widget.downcast_ref().ok_or(ViewError::WidgetMismatch {
            id,
            expected: type_name::<W>(),
        })
    }

    /// Typed mutable access to a view's widget.
    ///
    /// Widget setters track their own dirty state, so changes made here are
    /// picked up by the next [`ViewTree::measure`].
    pub fn widget_mut<W: Widget>(&mut self, id: ViewId) -> Result<&mut W, ViewError> {
        let node = self.node_opt_mut(id).ok_or(ViewError::Stale(id))?;
        let widget: &mut dyn Widget = node.widget.as_deref_mut().ok_or(ViewError::Busy(id))?;
        let widget: &mut dyn Any = widget;
        widget.downcast_mut().ok_or(ViewError::WidgetMismatch {
            id,
            expected: type_name::<W>(),
        })
    }

    /// Event handlers of a live view, for registration.
    ///
    /// ```rust
    /// use trellis_view::{Outcome, ViewTree, widgets::Spacer};
    ///
    /// let mut tree = ViewTree::new();
    /// let view = tree.insert(Spacer::new());
    /// if let Some(handlers) = tree.handlers(view) {
    ///     handlers.on_click(|_tree, _view, _click| Outcome::Stop);
    /// }
    /// ```
    pub fn handlers(&mut self, id: ViewId) -> Option<&mut Handlers> {
        self.node_opt_mut(id).map(|node| &mut node.handlers)
    }

    /// Drain recorded property changes, oldest first.
    pub fn take_changes(&mut self) -> Vec<PropertyChange> {
        core::mem::take(&mut self.changes)
    }

    /// Record that `property` of `id` changed, along with its dependents.
    ///
    /// Setters call this automatically; widgets call it for their own
    /// observable state. Does nothing unless change recording is enabled.
    pub fn notify(&mut self, id: ViewId, property: Property) {
        if !self.config.record_changes {
            return;
        }
        self.changes.extend(
            property
                .with_dependents()
                .into_iter()
                .map(|property| PropertyChange { view: id, property }),
        );
    }

    // --- properties ---

    /// Layout parameters (default for stale ids).
    pub fn layout(&self, id: ViewId) -> LayoutParameters {
        self.core(id).map(ViewCore::layout).unwrap_or_default()
    }

    /// Margin edges.
    pub fn margin(&self, id: ViewId) -> Edges {
        self.core(id).map(ViewCore::margin).unwrap_or_default()
    }

    /// Padding edges.
    pub fn padding(&self, id: ViewId) -> Edges {
        self.core(id).map(ViewCore::padding).unwrap_or_default()
    }

    /// Visibility; stale views are hidden.
    pub fn visibility(&self, id: ViewId) -> Visibility {
        self.core(id)
            .map_or(Visibility::Hidden, ViewCore::visibility)
    }

    /// Whether the view is live and visible.
    pub fn is_visible(&self, id: ViewId) -> bool {
        self.core(id).is_some_and(ViewCore::is_visible)
    }

    /// Z-index among siblings.
    pub fn z_index(&self, id: ViewId) -> i32 {
        self.core(id).map(ViewCore::z_index).unwrap_or_default()
    }

    /// Interaction flags; empty for stale ids.
    pub fn flags(&self, id: ViewId) -> ViewFlags {
        self.core(id).map_or(ViewFlags::empty(), ViewCore::flags)
    }

    /// Name of the view; empty for stale ids.
    pub fn name(&self, id: ViewId) -> &str {
        self.core(id).map_or("", ViewCore::name)
    }

    /// Set the layout parameters.
    pub fn set_layout(&mut self, id: ViewId, layout: LayoutParameters) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.layout.set(layout)
        {
            self.notify(id, Property::Layout);
        }
    }

    /// Set the margin. Negative edges pull the view outside its layout slot.
    pub fn set_margin(&mut self, id: ViewId, margin: Edges) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.margin.set(margin)
        {
            self.notify(id, Property::Margin);
        }
    }

    /// Set the padding.
    pub fn set_padding(&mut self, id: ViewId, padding: Edges) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.padding.set(padding)
        {
            self.notify(id, Property::Padding);
        }
    }

    /// Show or hide the view. Hidden views keep their layout slot.
    pub fn set_visibility(&mut self, id: ViewId, visibility: Visibility) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.visibility != visibility
        {
            n.core.visibility = visibility;
            self.notify(id, Property::Visibility);
        }
    }

    /// Allow or disallow focus on the view itself.
    pub fn set_focusable(&mut self, id: ViewId, focusable: bool) {
        self.set_flag(id, ViewFlags::FOCUSABLE, focusable, Property::Focusable);
    }

    /// Enable or disable drag events.
    pub fn set_draggable(&mut self, id: ViewId, draggable: bool) {
        self.set_flag(id, ViewFlags::DRAGGABLE, draggable, Property::Draggable);
    }

    /// Enable or disable pointer events for the view and its subtree.
    pub fn set_pointer_events_enabled(&mut self, id: ViewId, enabled: bool) {
        self.set_flag(
            id,
            ViewFlags::POINTER_EVENTS,
            enabled,
            Property::PointerEventsEnabled,
        );
    }

    fn set_flag(&mut self, id: ViewId, flag: ViewFlags, value: bool, property: Property) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.flags.contains(flag) != value
        {
            n.core.flags.set(flag, value);
            self.notify(id, property);
        }
    }

    /// Set the z-index.
    pub fn set_z_index(&mut self, id: ViewId, z_index: i32) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.z_index != z_index
        {
            n.core.z_index = z_index;
            self.notify(id, Property::ZIndex);
        }
    }

    /// Set the name.
    pub fn set_name(&mut self, id: ViewId, name: impl Into<String>) {
        let name = name.into();
        if let Some(n) = self.node_opt_mut(id)
            && n.core.name != name
        {
            n.core.name = name;
            self.notify(id, Property::Name);
        }
    }

    /// Set or clear the tooltip.
    pub fn set_tooltip(&mut self, id: ViewId, tooltip: Option<String>) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.tooltip != tooltip
        {
            n.core.tooltip = tooltip;
            self.notify(id, Property::Tooltip);
        }
    }

    /// Replace the tags.
    pub fn set_tags(&mut self, id: ViewId, tags: Tags) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.tags != tags
        {
            n.core.tags = tags;
            self.notify(id, Property::Tags);
        }
    }

    /// Set the axis along which scroll containers keep this view together
    /// with its descendants when scrolling them into view.
    pub fn set_scroll_with_children(&mut self, id: ViewId, orientation: Option<Orientation>) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.scroll_with_children != orientation
        {
            n.core.scroll_with_children = orientation;
            self.notify(id, Property::ScrollWithChildren);
        }
    }

    /// Replace the floating elements. Placement happens on the next measure.
    pub fn set_floating_elements(&mut self, id: ViewId, floating: Vec<FloatingElement>) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.floating != floating
        {
            n.core.floating = floating;
            self.notify(id, Property::FloatingElements);
        }
    }

    /// Float `view` next to `id`.
    pub fn add_floating_element(&mut self, id: ViewId, view: ViewId, position: FloatingPosition) {
        if let Some(n) = self.node_opt_mut(id) {
            n.core.floating.push(FloatingElement::new(view, position));
            self.notify(id, Property::FloatingElements);
        }
    }

    /// Remove every floating element showing `view`. Returns whether any was removed.
    pub fn remove_floating_element(&mut self, id: ViewId, view: ViewId) -> bool {
        let Some(n) = self.node_opt_mut(id) else {
            return false;
        };
        let before = n.core.floating.len();
        n.core.floating.retain(|float| float.view != view);
        let removed = n.core.floating.len() != before;
        if removed {
            self.notify(id, Property::FloatingElements);
        }
        removed
    }

    pub(crate) fn set_content_size(&mut self, id: ViewId, size: Size) {
        if let Some(n) = self.node_opt_mut(id)
            && n.core.content_size != size
        {
            n.core.content_size = size;
            self.notify(id, Property::ContentSize);
        }
    }

    // --- geometry ---

    /// Border thickness reported by the widget.
    pub fn border_thickness(&self, id: ViewId) -> Edges {
        self.widget_dyn(id)
            .map(Widget::border_thickness)
            .unwrap_or_default()
    }

    /// Content size as of the last measure.
    pub fn content_size(&self, id: ViewId) -> Size {
        self.core(id).map_or(Size::ZERO, ViewCore::content_size)
    }

    /// Content plus padding.
    pub fn inner_size(&self, id: ViewId) -> Size {
        self.content_size(id) + self.padding(id).total()
    }

    /// Inner size plus border.
    pub fn border_size(&self, id: ViewId) -> Size {
        self.inner_size(id) + self.border_thickness(id).total()
    }

    /// Border size plus margin: the size the view occupies in its parent's layout.
    pub fn outer_size(&self, id: ViewId) -> Size {
        self.border_size(id) + self.margin(id).total()
    }

    /// Bounds used for hit testing, relative to the view's layout origin.
    ///
    /// Negative top or left margins move the origin; negative edges never
    /// grow the size.
    pub fn actual_bounds(&self, id: ViewId) -> Bounds {
        let margin = self.margin(id);
        let origin = Point::new(f64::from(margin.left.min(0)), f64::from(margin.top.min(0)));
        let border_size = self.border_size(id);
        let size = Size::new(
            border_size.width + f64::from(margin.left.max(0)) + f64::from(margin.right.max(0)),
            border_size.height + f64::from(margin.top.max(0)) + f64::from(margin.bottom.max(0)),
        );
        Bounds::new(origin, size)
    }

    /// Bounds of the content area, relative to the view's layout origin.
    pub fn content_bounds(&self, id: ViewId) -> Bounds {
        let margin = self.margin(id);
        let actual = self.actual_bounds(id);
        let origin = actual.origin
            + Vec2::new(f64::from(margin.left.max(0)), f64::from(margin.top.max(0)));
        Bounds::new(origin, self.content_size(id))
    }

    /// Translation from the view's layout origin to its content origin.
    pub fn content_offset(&self, id: ViewId) -> Vec2 {
        let layout_offset = self
            .widget_dyn(id)
            .map_or(Vec2::ZERO, Widget::layout_offset);
        layout_offset
            + self.margin(id).top_left()
            + self.border_thickness(id).top_left()
            + self.padding(id).top_left()
    }

    /// Bounds of every floating element in the subtree, relative to this view.
    pub fn floating_bounds(&self, id: ViewId) -> Vec<Bounds> {
        let Some(core) = self.core(id) else {
            return Vec::new();
        };
        let mut bounds = Vec::new();
        for float in &core.floating {
            let child = float.as_view_child();
            bounds.push(child.actual_bounds(self));
            bounds.extend(child.floating_bounds(self));
        }
        for child in self.local_children(id) {
            bounds.extend(child.floating_bounds(self));
        }
        bounds
    }

    /// Whether anything in the subtree draws outside of this view's actual bounds.
    pub fn has_out_of_bounds_content(&self, id: ViewId) -> bool {
        let Some(core) = self.core(id) else {
            return false;
        };
        if core.children_out_of_bounds {
            return true;
        }
        let actual = self.actual_bounds(id);
        core.floating
            .iter()
            .any(|float| !actual.contains_bounds(float.as_view_child().actual_bounds(self)))
    }

    /// Whether `point` (relative to the view's layout origin) hits the view,
    /// one of its floats, or out-of-bounds content of a child.
    pub fn contains_point(&self, id: ViewId, point: Point) -> bool {
        let Some(core) = self.core(id) else {
            return false;
        };
        self.actual_bounds(id).contains_point(point)
            || self
                .floating_bounds(id)
                .iter()
                .any(|bounds| bounds.contains_point(point))
            || (core.children_out_of_bounds
                && self
                    .children(id)
                    .iter()
                    .any(|child| child.contains_point(self, point)))
    }

    // --- children ---

    /// Laid-out children followed by floating elements, relative to the view's
    /// layout origin.
    pub fn children(&self, id: ViewId) -> Vec<ViewChild> {
        let Some(core) = self.core(id) else {
            return Vec::new();
        };
        let mut children = self.local_children(id);
        children.extend(core.floating.iter().map(FloatingElement::as_view_child));
        children
    }

    fn local_children(&self, id: ViewId) -> Vec<ViewChild> {
        let Some(widget) = self.widget_dyn(id) else {
            return Vec::new();
        };
        let offset = self.content_offset(id);
        widget
            .children()
            .iter()
            .filter(|child| self.is_alive(child.view))
            .map(|child| child.offset(offset))
            .collect()
    }

    /// Visible children containing `position`, front to back, followed by
    /// floating elements containing it.
    pub fn children_at(&self, id: ViewId, position: Point) -> ChildList {
        let Some(core) = self.core(id) else {
            return ChildList::new();
        };
        let offset = self.content_offset(id);
        let mut hits: ChildList = self
            .widget_dyn(id)
            .map(|widget| widget.children_at(self, position - offset))
            .unwrap_or_default()
            .into_iter()
            .filter(|child| self.is_visible(child.view))
            .map(|child| child.offset(offset))
            .collect();
        hits.extend(
            core.floating
                .iter()
                .map(FloatingElement::as_view_child)
                .filter(|child| child.contains_point(self, position)),
        );
        hits
    }

    /// Frontmost child at `position`.
    pub fn child_at(&self, id: ViewId, position: Point) -> Option<ViewChild> {
        self.children_at(id, position).into_iter().next()
    }

    /// Current position of `child` within `id`, if it is a child or float.
    pub fn child_position(&self, id: ViewId, child: ViewId) -> Option<Point> {
        self.children(id)
            .into_iter()
            .find(|c| c.view == child)
            .map(|c| c.position)
    }

    // --- layout ---

    /// Whether the view needs a new layout pass.
    pub fn is_dirty(&self, id: ViewId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        node.core.is_base_dirty()
            || node
                .widget
                .as_deref()
                .is_some_and(|widget| widget.is_content_dirty(self))
    }

    /// Lay out the view within `available` space (its outer size budget).
    ///
    /// Returns `true` exactly when a new layout was performed: either the
    /// view was dirty or `available` differs from the previous call. Floating
    /// elements are measured afterward against the new outer size, and are
    /// re-placed when either they or the view changed.
    pub fn measure(&mut self, id: ViewId, available: Size) -> bool {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("measure", view = self.name(id)).entered();
        let Some(node) = self.node(id) else {
            return false;
        };
        if node.core.last_available_size == Some(available) && !self.is_dirty(id) {
            self.measure_floats(id, false);
            return false;
        }
        let edges = self.margin(id) + self.padding(id) + self.border_thickness(id);
        let total = edges.total();
        let adjusted = Size::new(
            (available.width - total.width).max(0.0),
            (available.height - total.height).max(0.0),
        );
        let Some(mut widget) = self.take_widget(id) else {
            return false;
        };
        let content_size = widget.measure(&mut LayoutCx { tree: self, view: id }, adjusted);
        widget.reset_dirty();
        if !self.restore_widget(id, widget) {
            return true;
        }
        self.set_content_size(id, content_size);
        if let Some(n) = self.node_opt_mut(id) {
            n.core.last_available_size = Some(available);
            n.core.reset_dirty();
        }
        let out_of_bounds = self
            .children(id)
            .iter()
            .any(|child| self.has_out_of_bounds_content(child.view));
        if let Some(n) = self.node_opt_mut(id) {
            n.core.children_out_of_bounds = out_of_bounds;
        }
        self.measure_floats(id, true);
        true
    }

    fn measure_floats(&mut self, id: ViewId, parent_changed: bool) {
        let Some(core) = self.core(id) else {
            return;
        };
        let floating = core.floating.clone();
        let parent_size = self.outer_size(id);
        let mut placed = Vec::with_capacity(floating.len());
        for float in floating {
            let changed = self.measure(float.view, parent_size);
            if changed || parent_changed {
                let offset = float
                    .position
                    .offset(self.outer_size(float.view), parent_size);
                placed.push((float.view, offset));
            }
        }
        if placed.is_empty() {
            return;
        }
        let mut moved = false;
        if let Some(n) = self.node_opt_mut(id) {
            for (view, offset) in placed {
                for float in n.core.floating.iter_mut().filter(|f| f.view == view) {
                    moved |= float.offset != offset;
                    float.offset = offset;
                }
            }
        }
        if moved {
            self.notify(id, Property::FloatingBounds);
        }
    }

    // --- drawing ---

    /// Draw the view with its layout origin at the surface's current origin.
    ///
    /// The border is drawn inside the margin, content inside border and
    /// padding, and floating elements last at their offsets. The surface
    /// state is restored before returning.
    pub fn draw(&self, id: ViewId, surface: &mut dyn Surface) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.core.is_visible() {
            return;
        }
        let Some(widget) = node.widget.as_deref() else {
            return;
        };
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("draw", view = node.core.name()).entered();
        let inner_offset = widget.border_thickness().top_left() + node.core.padding().top_left();
        let mut cx = DrawCx {
            tree: self,
            surface,
            view: id,
        };
        cx.surface.save();
        cx.surface.translate(node.core.margin().top_left());
        widget.draw_border(&mut cx);
        cx.surface.translate(inner_offset);
        widget.draw_content(&mut cx);
        cx.surface.restore();
        for float in &node.core.floating {
            cx.draw_child(float.as_view_child());
        }
    }

    // --- frame hooks ---

    /// Run per-frame updates on the view, then on all of its children.
    pub fn update(&mut self, id: ViewId, elapsed: Duration) {
        let Some(mut widget) = self.take_widget(id) else {
            return;
        };
        widget.update(self, id, elapsed);
        if !self.restore_widget(id, widget) {
            return;
        }
        for child in self.children(id) {
            self.update(child.view, elapsed);
        }
    }

    /// Scroll so that the last element of `path` is visible.
    ///
    /// `path` is a chain of children starting below `id`, such as the path of
    /// a [`FocusSearchResult`](crate::FocusSearchResult) with its target
    /// appended; leading elements equal to `id` are skipped. Returns the total
    /// distance scrolled by every container along the path, or `None` if
    /// nothing scrolled.
    pub fn scroll_into_view(&mut self, id: ViewId, path: &[ViewChild]) -> Option<Vec2> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("scroll_into_view", view = self.name(id)).entered();
        let start = path
            .iter()
            .position(|child| child.view != id)
            .unwrap_or(path.len());
        let path = &path[start..];
        if path.is_empty() {
            return None;
        }
        let mut widget = self.take_widget(id)?;
        let distance = widget.scroll_into_view(self, id, path);
        self.restore_widget(id, widget);
        distance
    }

    // --- internals ---

    pub(crate) fn node(&self, id: ViewId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn widget_dyn(&self, id: ViewId) -> Option<&dyn Widget> {
        self.node(id)?.widget.as_deref()
    }

    fn take_widget(&mut self, id: ViewId) -> Option<Box<dyn Widget>> {
        self.node_opt_mut(id)?.widget.take()
    }

    /// Put a checked-out widget back. Returns `false` if the view was removed
    /// in the meantime, in which case the widget is dropped.
    fn restore_widget(&mut self, id: ViewId, widget: Box<dyn Widget>) -> bool {
        match self.node_opt_mut(id) {
            Some(node) => {
                node.widget = Some(widget);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, DrawRecorder, SpriteId};
    use crate::widgets::{Lane, Spacer};
    use kurbo::Rect;

    #[derive(Debug)]
    struct Tile(u32);

    impl Widget for Tile {
        fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
            cx.layout().resolve(available, || Size::ZERO)
        }

        fn draw_content(&self, cx: &mut DrawCx<'_>) {
            let size = cx.content_size();
            cx.surface()
                .draw_sprite(SpriteId(self.0), Rect::from_origin_size(Point::ZERO, size));
        }

        fn border_thickness(&self) -> Edges {
            Edges::all(1)
        }
    }

    fn sized(tree: &mut ViewTree, w: f64, h: f64) -> ViewId {
        let id = tree.insert(Spacer::new());
        tree.set_layout(id, LayoutParameters::fixed_size(w, h));
        id
    }

    #[test]
    fn stale_ids_are_inert() {
        let mut tree = ViewTree::new();
        let a = sized(&mut tree, 10.0, 10.0);
        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert_eq!(tree.outer_size(a), Size::ZERO);
        assert!(!tree.measure(a, Size::new(10.0, 10.0)));
        assert_eq!(tree.widget::<Spacer>(a).err(), Some(ViewError::Stale(a)));
        tree.set_margin(a, Edges::all(3));
        assert!(tree.core(a).is_none());

        // Slot reuse bumps the generation.
        let b = tree.insert(Spacer::new());
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b);
        assert!(!tree.is_alive(a));
    }

    #[test]
    fn removing_a_container_removes_its_subtree() {
        let mut tree = ViewTree::new();
        let a = sized(&mut tree, 10.0, 10.0);
        let float = sized(&mut tree, 5.0, 5.0);
        let lane = tree.insert(Lane::with_children(Orientation::Horizontal, [a]));
        tree.add_floating_element(lane, float, FloatingPosition::BelowParent);
        tree.remove(lane);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(float));
    }

    #[test]
    fn widget_type_mismatch() {
        let mut tree = ViewTree::new();
        let a = tree.insert(Spacer::new());
        assert!(tree.widget::<Spacer>(a).is_ok());
        assert!(matches!(
            tree.widget::<Lane>(a),
            Err(ViewError::WidgetMismatch { id, .. }) if id == a
        ));
    }

    #[test]
    fn measure_is_idempotent() {
        let mut tree = ViewTree::new();
        let a = sized(&mut tree, 30.0, 20.0);
        tree.set_margin(a, Edges::all(2));
        let available = Size::new(100.0, 100.0);
        assert!(tree.measure(a, available));
        let first = tree.outer_size(a);
        assert!(!tree.measure(a, available));
        assert_eq!(tree.outer_size(a), first);
        assert_eq!(first, Size::new(34.0, 24.0));
        // A different budget forces a new pass.
        assert!(tree.measure(a, Size::new(50.0, 50.0)));
    }

    #[test]
    fn margin_change_dirties_layout() {
        let mut tree = ViewTree::new();
        let a = sized(&mut tree, 30.0, 20.0);
        let available = Size::new(100.0, 100.0);
        tree.measure(a, available);
        assert!(!tree.is_dirty(a));
        tree.set_margin(a, Edges::symmetric(4, 0));
        assert!(tree.is_dirty(a));
        assert!(tree.measure(a, available));
        assert_eq!(tree.outer_size(a), Size::new(38.0, 20.0));
        // Setting the same value again is not a change.
        tree.set_margin(a, Edges::symmetric(4, 0));
        assert!(!tree.is_dirty(a));
    }

    #[test]
    fn derived_sizes_and_bounds() {
        let mut tree = ViewTree::new();
        let tile = tree.insert(Tile(1));
        tree.set_layout(tile, LayoutParameters::fixed_size(10.0, 10.0));
        tree.set_padding(tile, Edges::all(2));
        tree.set_margin(tile, Edges::new(-5, 3, 4, 0));
        tree.measure(tile, Size::new(100.0, 100.0));

        assert_eq!(tree.content_size(tile), Size::new(10.0, 10.0));
        assert_eq!(tree.inner_size(tile), Size::new(14.0, 14.0));
        assert_eq!(tree.border_size(tile), Size::new(16.0, 16.0));
        assert_eq!(tree.outer_size(tile), Size::new(15.0, 19.0));
        assert_eq!(
            tree.actual_bounds(tile),
            Bounds::new(Point::new(-5.0, 0.0), Size::new(20.0, 19.0))
        );
        assert_eq!(
            tree.content_bounds(tile),
            Bounds::new(Point::new(-5.0, 3.0), Size::new(10.0, 10.0))
        );
        assert_eq!(tree.content_offset(tile), Vec2::new(-2.0, 6.0));
    }

    #[test]
    fn measure_subtracts_edges_from_available_space() {
        let mut tree = ViewTree::new();
        let tile = tree.insert(Tile(1));
        tree.set_layout(tile, LayoutParameters::fill());
        tree.set_padding(tile, Edges::all(5));
        tree.measure(tile, Size::new(50.0, 8.0));
        // 50 - 10 padding - 2 border; height floors at zero.
        assert_eq!(tree.content_size(tile), Size::new(38.0, 0.0));
    }

    #[test]
    fn draw_applies_edges_and_z_order() {
        let mut tree = ViewTree::new();
        let back = tree.insert(Tile(1));
        let front = tree.insert(Tile(2));
        for id in [back, front] {
            tree.set_layout(id, LayoutParameters::fixed_size(4.0, 4.0));
        }
        tree.set_z_index(back, -1);
        let lane = tree.insert(Lane::with_children(Orientation::Horizontal, [front, back]));
        tree.set_margin(lane, Edges::all(10));
        tree.measure(lane, Size::new(100.0, 100.0));

        let mut surface = DrawRecorder::new();
        tree.draw(lane, &mut surface);
        assert_eq!(surface.depth(), 0);
        // `back` draws first despite coming second in layout order.
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Sprite {
                    sprite: SpriteId(1),
                    dest: Rect::new(17.0, 11.0, 21.0, 15.0),
                    clip: None,
                },
                DrawOp::Sprite {
                    sprite: SpriteId(2),
                    dest: Rect::new(11.0, 11.0, 15.0, 15.0),
                    clip: None,
                },
            ]
        );
    }

    #[test]
    fn hidden_views_do_not_draw() {
        let mut tree = ViewTree::new();
        let tile = tree.insert(Tile(1));
        tree.set_layout(tile, LayoutParameters::fixed_size(4.0, 4.0));
        tree.measure(tile, Size::new(10.0, 10.0));
        tree.set_visibility(tile, Visibility::Hidden);
        let mut surface = DrawRecorder::new();
        tree.draw(tile, &mut surface);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn fractional_float_inside_parent_is_in_bounds() {
        let mut tree = ViewTree::new();
        let parent = sized(&mut tree, 0.6, 0.6);
        let float = sized(&mut tree, 0.2, 0.2);
        tree.add_floating_element(
            parent,
            float,
            FloatingPosition::Offset(Vec2::new(0.1, 0.1)),
        );
        tree.measure(parent, Size::new(10.0, 10.0));
        assert!(!tree.has_out_of_bounds_content(parent));
    }

    #[test]
    fn huge_margins_do_not_overflow() {
        let mut tree = ViewTree::new();
        let view = sized(&mut tree, 4.0, 4.0);
        tree.set_margin(view, Edges::all(i32::MAX));
        tree.measure(view, Size::new(10.0, 10.0));
        let expected = tree.border_size(view).width + 2.0 * f64::from(i32::MAX);
        let bounds = tree.actual_bounds(view);
        assert_eq!(bounds.origin, Point::ZERO);
        assert_eq!(bounds.size.width, expected);
        assert_eq!(tree.outer_size(view).width, expected);
    }

    #[test]
    fn floats_are_placed_after_parent_layout() {
        let mut tree = ViewTree::new();
        let parent = sized(&mut tree, 40.0, 20.0);
        let float = sized(&mut tree, 10.0, 5.0);
        tree.add_floating_element(parent, float, FloatingPosition::BelowParent);
        tree.measure(parent, Size::new(100.0, 100.0));
        let offset = tree.core(parent).map(|c| c.floating_elements()[0].offset());
        assert_eq!(offset, Some(Vec2::new(0.0, 20.0)));
        assert!(tree.has_out_of_bounds_content(parent));
        assert!(tree.contains_point(parent, Point::new(5.0, 22.0)));
        assert!(!tree.contains_point(parent, Point::new(15.0, 22.0)));
        assert_eq!(
            tree.child_position(parent, float),
            Some(Point::new(0.0, 20.0))
        );

        // Parent grows: the float moves even though its own size is unchanged.
        tree.set_layout(parent, LayoutParameters::fixed_size(40.0, 30.0));
        tree.measure(parent, Size::new(100.0, 100.0));
        assert_eq!(
            tree.child_position(parent, float),
            Some(Point::new(0.0, 30.0))
        );

        // Float changes on its own: repositioned on a clean parent pass.
        tree.set_layout(float, LayoutParameters::fixed_size(10.0, 8.0));
        tree.set_floating_elements(
            parent,
            vec![FloatingElement::new(float, FloatingPosition::AboveParent)],
        );
        assert!(!tree.measure(parent, Size::new(100.0, 100.0)));
        assert_eq!(
            tree.child_position(parent, float),
            Some(Point::new(0.0, -8.0))
        );
    }

    #[test]
    fn setters_record_changes_with_dependents() {
        let mut tree = ViewTree::with_config(ViewTreeConfig {
            record_changes: true,
            ..ViewTreeConfig::default()
        });
        let a = tree.insert(Spacer::new());
        tree.set_padding(a, Edges::all(1));
        tree.set_padding(a, Edges::all(1));
        tree.set_tooltip(a, Some("hint".into()));
        let changes: Vec<_> = tree
            .take_changes()
            .into_iter()
            .map(|c| c.property)
            .collect();
        assert_eq!(
            changes,
            vec![
                Property::Padding,
                Property::InnerSize,
                Property::BorderSize,
                Property::OuterSize,
                Property::ActualBounds,
                Property::ContentBounds,
                Property::Tooltip,
            ]
        );
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn default_name_is_type_name() {
        let mut tree = ViewTree::new();
        let a = tree.insert(Spacer::new());
        assert_eq!(tree.name(a), "Spacer");
        tree.set_name(a, "gap");
        assert_eq!(tree.name(a), "gap");
    }
}
