// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrappers that forward layout and interaction to a swappable inner view.
//!
//! Composite widgets often present one view but build it from another that
//! may be replaced at runtime (a button whose label becomes an image, say).
//! A [`Decorator`] holds the current inner view and a set of [`Decorated`]
//! properties. An explicit override survives swapping the inner view: the new
//! view receives it immediately. A property that was never overridden keeps
//! whatever the inner view itself has.

use kurbo::{Point, Size};
use trellis_layout::{DirtyTracker, Direction, Edges, LayoutParameters, Visibility};

use crate::child::{FocusSearchResult, ViewChild};
use crate::error::ViewError;
use crate::widget::{LayoutCx, Widget};
use crate::{ViewId, ViewTree};

/// Either an explicit override, or "whatever the inner view has".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decorated<T> {
    value: Option<T>,
}

impl<T> Default for Decorated<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Clone> Decorated<T> {
    /// Inherit from the inner view.
    pub const fn inherit() -> Self {
        Self { value: None }
    }

    /// Override with `value`.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Go back to inheriting. The inner view keeps the last applied value.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Whether an override is present.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The override, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The override, or `inherited` when there is none.
    pub fn resolve(&self, inherited: impl FnOnce() -> T) -> T {
        self.value.clone().unwrap_or_else(inherited)
    }

    fn apply(&self, tree: &mut ViewTree, view: ViewId, set: impl FnOnce(&mut ViewTree, ViewId, T)) {
        if let Some(value) = &self.value {
            set(tree, view, value.clone());
        }
    }
}

/// The properties a [`Decorator`] forwards to its inner view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecoratedProperties {
    /// Layout parameters.
    pub layout: Decorated<LayoutParameters>,
    /// Margin edges.
    pub margin: Decorated<Edges>,
    /// Padding edges.
    pub padding: Decorated<Edges>,
    /// Visibility.
    pub visibility: Decorated<Visibility>,
    /// Focusable flag.
    pub focusable: Decorated<bool>,
    /// Tooltip text.
    pub tooltip: Decorated<Option<String>>,
    /// Z-index.
    pub z_index: Decorated<i32>,
    /// Pointer events flag.
    pub pointer_events_enabled: Decorated<bool>,
}

impl DecoratedProperties {
    /// Push every override onto `view`.
    pub fn apply(&self, tree: &mut ViewTree, view: ViewId) {
        self.layout.apply(tree, view, ViewTree::set_layout);
        self.margin.apply(tree, view, ViewTree::set_margin);
        self.padding.apply(tree, view, ViewTree::set_padding);
        self.visibility.apply(tree, view, ViewTree::set_visibility);
        self.focusable.apply(tree, view, ViewTree::set_focusable);
        self.tooltip.apply(tree, view, ViewTree::set_tooltip);
        self.z_index.apply(tree, view, ViewTree::set_z_index);
        self.pointer_events_enabled
            .apply(tree, view, ViewTree::set_pointer_events_enabled);
    }
}

/// A transparent view around one swappable inner view.
///
/// The decorator sizes itself to the inner view, reports it as its only child
/// at the origin and forwards focus searches to it. Leave the decorator's own
/// layout and edges at their defaults and configure the inner view through
/// [`Decorator::configure`] instead.
///
/// Operations that need both the decorator and the tree are associated
/// functions taking the decorator's id.
#[derive(Debug, Default)]
pub struct Decorator {
    inner: DirtyTracker<Option<ViewId>>,
    properties: DecoratedProperties,
    child: Option<ViewChild>,
}

impl Decorator {
    /// Decorator with no inner view yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorator around `inner`.
    pub fn with_inner(inner: ViewId) -> Self {
        Self {
            inner: DirtyTracker::new(Some(inner)),
            ..Self::default()
        }
    }

    /// The current inner view.
    pub fn inner(&self) -> Option<ViewId> {
        *self.inner
    }

    /// Current overrides.
    pub fn properties(&self) -> &DecoratedProperties {
        &self.properties
    }

    /// Replace the inner view of `decorator` and apply the stored overrides
    /// to the new one. The old inner view stays in the tree unchanged.
    pub fn set_inner(
        tree: &mut ViewTree,
        decorator: ViewId,
        inner: Option<ViewId>,
    ) -> Result<(), ViewError> {
        let widget = tree.widget_mut::<Self>(decorator)?;
        if *widget.inner == inner {
            return Ok(());
        }
        widget.inner.set(inner);
        let properties = widget.properties.clone();
        #[cfg(feature = "tracing")]
        tracing::debug!(?decorator, ?inner, "decorator inner view swapped");
        if let Some(inner) = inner {
            properties.apply(tree, inner);
        }
        Ok(())
    }

    /// Change the overrides of `decorator` and apply them to its inner view.
    ///
    /// The overrides are stored even when there is no inner view, and are
    /// applied once one is set; that case still reports
    /// [`ViewError::DecoratorDetached`].
    ///
    /// ```
    /// use trellis_view::{LayoutParameters, ViewTree};
    /// use trellis_view::widgets::{Decorator, Spacer};
    ///
    /// let mut tree = ViewTree::new();
    /// let inner = tree.insert(Spacer::new());
    /// let decorator = tree.insert(Decorator::with_inner(inner));
    /// Decorator::configure(&mut tree, decorator, |p| {
    ///     p.layout.set(LayoutParameters::fixed_size(8.0, 8.0));
    /// })
    /// .unwrap();
    /// assert_eq!(tree.layout(inner), LayoutParameters::fixed_size(8.0, 8.0));
    /// ```
    pub fn configure(
        tree: &mut ViewTree,
        decorator: ViewId,
        f: impl FnOnce(&mut DecoratedProperties),
    ) -> Result<(), ViewError> {
        let widget = tree.widget_mut::<Self>(decorator)?;
        f(&mut widget.properties);
        let properties = widget.properties.clone();
        let inner = *widget.inner;
        let inner = inner
            .filter(|&inner| tree.is_alive(inner))
            .ok_or(ViewError::DecoratorDetached(decorator))?;
        properties.apply(tree, inner);
        Ok(())
    }
}

impl Widget for Decorator {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let layout = cx.layout();
        let inner = (*self.inner).filter(|&inner| cx.is_alive(inner));
        self.child = inner.map(|inner| ViewChild::new(inner, Point::ZERO));
        let Some(inner) = inner else {
            return layout.resolve(available, || Size::ZERO);
        };
        cx.measure(inner, layout.limits(available));
        let outer = cx.outer_size(inner);
        layout.resolve(available, || outer)
    }

    fn children(&self) -> &[ViewChild] {
        self.child.as_slice()
    }

    fn owned_views(&self) -> Vec<ViewId> {
        (*self.inner).into_iter().collect()
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
        self.inner.is_dirty() || (*self.inner).is_some_and(|inner| tree.is_dirty(inner))
    }

    fn reset_dirty(&mut self) {
        self.inner.reset_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Spacer;

    fn spacer(tree: &mut ViewTree, w: f64, h: f64) -> ViewId {
        let id = tree.insert(Spacer::new());
        tree.set_layout(id, LayoutParameters::fixed_size(w, h));
        id
    }

    #[test]
    fn decorated_value_resolves_override_first() {
        let mut value = Decorated::inherit();
        assert_eq!(value.resolve(|| 3), 3);
        value.set(7);
        assert!(value.is_set());
        assert_eq!(value.resolve(|| 3), 7);
        value.clear();
        assert_eq!(value.value(), None);
    }

    #[test]
    fn overrides_survive_inner_swap() {
        let mut tree = ViewTree::new();
        let first = spacer(&mut tree, 10.0, 10.0);
        let second = spacer(&mut tree, 5.0, 5.0);
        tree.set_margin(second, Edges::all(2));
        let decorator = tree.insert(Decorator::with_inner(first));
        let configured = Decorator::configure(&mut tree, decorator, |p| {
            p.layout.set(LayoutParameters::fixed_size(30.0, 30.0));
            p.z_index.set(3);
        });
        assert_eq!(configured, Ok(()));
        assert_eq!(tree.layout(first), LayoutParameters::fixed_size(30.0, 30.0));

        assert_eq!(Decorator::set_inner(&mut tree, decorator, Some(second)), Ok(()));
        assert_eq!(tree.layout(second), LayoutParameters::fixed_size(30.0, 30.0));
        assert_eq!(tree.z_index(second), 3);
        // Margin was never overridden, so the new view keeps its own.
        assert_eq!(tree.margin(second), Edges::all(2));

        tree.measure(decorator, Size::new(100.0, 100.0));
        assert_eq!(tree.outer_size(decorator), Size::new(34.0, 34.0));
        assert_eq!(tree.children(decorator).len(), 1);
        assert_eq!(tree.child_position(decorator, second), Some(Point::ZERO));
    }

    #[test]
    fn detached_decorator_keeps_overrides_for_later() {
        let mut tree = ViewTree::new();
        let decorator = tree.insert(Decorator::new());
        let result = Decorator::configure(&mut tree, decorator, |p| p.focusable.set(true));
        assert_eq!(result, Err(ViewError::DecoratorDetached(decorator)));

        let inner = spacer(&mut tree, 4.0, 4.0);
        assert!(!tree.flags(inner).contains(crate::ViewFlags::FOCUSABLE));
        assert_eq!(Decorator::set_inner(&mut tree, decorator, Some(inner)), Ok(()));
        assert!(tree.flags(inner).contains(crate::ViewFlags::FOCUSABLE));
    }

    #[test]
    fn configure_rejects_other_widgets() {
        let mut tree = ViewTree::new();
        let plain = tree.insert(Spacer::new());
        let result = Decorator::configure(&mut tree, plain, |p| p.z_index.set(1));
        assert!(matches!(result, Err(ViewError::WidgetMismatch { .. })));
    }

    #[test]
    fn focus_passes_through_to_inner() {
        let mut tree = ViewTree::new();
        let inner = spacer(&mut tree, 10.0, 10.0);
        tree.set_focusable(inner, true);
        let decorator = tree.insert(Decorator::with_inner(inner));
        tree.measure(decorator, Size::new(100.0, 100.0));
        let found = tree.focus_search(decorator, Point::new(-5.0, 5.0), Direction::East);
        assert_eq!(found.map(|f| f.target.view), Some(inner));
        assert_eq!(
            tree.child_at(decorator, Point::new(5.0, 5.0)).map(|c| c.view),
            Some(inner)
        );
    }
}
