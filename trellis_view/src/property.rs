// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property change notifications.
//!
//! When [`ViewTreeConfig::record_changes`](crate::ViewTreeConfig::record_changes)
//! is on, every setter that changes a value queues a [`PropertyChange`], followed
//! by one for each derived property that depends on it. Hosts drain the queue
//! with [`ViewTree::take_changes`](crate::ViewTree::take_changes), typically once
//! per frame, to drive bindings.

use crate::ViewId;

/// Observable properties of a view.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Property {
    /// Layout parameters.
    Layout,
    /// Margin edges.
    Margin,
    /// Padding edges.
    Padding,
    /// Measured content size.
    ContentSize,
    /// Content plus padding.
    InnerSize,
    /// Inner size plus border.
    BorderSize,
    /// Border size plus margin.
    OuterSize,
    /// Hit-test bounds.
    ActualBounds,
    /// Content area bounds.
    ContentBounds,
    /// Visibility.
    Visibility,
    /// Focusable flag.
    Focusable,
    /// Draggable flag.
    Draggable,
    /// Pointer events flag.
    PointerEventsEnabled,
    /// Z-index.
    ZIndex,
    /// Name.
    Name,
    /// Tooltip.
    Tooltip,
    /// Tags.
    Tags,
    /// Scroll-with-children orientation.
    ScrollWithChildren,
    /// Floating element list.
    FloatingElements,
    /// Bounds of floating elements.
    FloatingBounds,
    /// Scroll offset of a scroll container.
    ScrollOffset,
}

impl Property {
    /// Derived properties that change whenever `self` does.
    pub fn dependents(self) -> &'static [Self] {
        match self {
            Self::Margin => &[Self::OuterSize, Self::ActualBounds],
            Self::Padding | Self::ContentSize => &[Self::InnerSize],
            Self::InnerSize => &[Self::BorderSize],
            Self::BorderSize => &[Self::OuterSize, Self::ActualBounds],
            Self::ActualBounds => &[Self::ContentBounds],
            Self::FloatingElements => &[Self::FloatingBounds],
            _ => &[],
        }
    }

    /// `self` followed by every transitive dependent, without duplicates.
    pub fn with_dependents(self) -> Vec<Self> {
        let mut out = vec![self];
        let mut next = 0;
        while let Some(&current) = out.get(next) {
            for &dependent in current.dependents() {
                if !out.contains(&dependent) {
                    out.push(dependent);
                }
            }
            next += 1;
        }
        out
    }
}

/// A property of `view` changed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PropertyChange {
    /// The view whose property changed.
    pub view: ViewId,
    /// Which property.
    pub property: Property,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_cascades_to_content_bounds() {
        assert_eq!(
            Property::Margin.with_dependents(),
            vec![
                Property::Margin,
                Property::OuterSize,
                Property::ActualBounds,
                Property::ContentBounds,
            ]
        );
    }

    #[test]
    fn content_size_reaches_outer_size() {
        let all = Property::ContentSize.with_dependents();
        assert_eq!(all[0], Property::ContentSize);
        for expected in [
            Property::InnerSize,
            Property::BorderSize,
            Property::OuterSize,
            Property::ActualBounds,
            Property::ContentBounds,
        ] {
            assert!(all.contains(&expected), "missing {expected:?}");
        }
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn leaf_properties_have_no_dependents() {
        assert_eq!(Property::Tooltip.with_dependents(), vec![Property::Tooltip]);
    }
}
