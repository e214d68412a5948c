// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::widget::{LayoutCx, Widget};

/// Empty view that takes up space according to its layout.
///
/// With the default content-sized layout a spacer is zero-sized; give it a
/// fixed or stretched [`LayoutParameters`](crate::LayoutParameters) to push
/// siblings apart.
#[derive(Clone, Debug, Default)]
pub struct Spacer;

impl Spacer {
    /// New spacer.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Spacer {
    fn measure(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        cx.layout().resolve(available, || Size::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewTree;
    use trellis_layout::{Length, LayoutParameters};

    #[test]
    fn resolves_layout_without_content() {
        let mut tree = ViewTree::new();
        let spacer = tree.insert(Spacer::new());
        tree.measure(spacer, Size::new(80.0, 60.0));
        assert_eq!(tree.content_size(spacer), Size::ZERO);

        tree.set_layout(
            spacer,
            LayoutParameters {
                width: Length::Percent(50.0),
                height: Length::Stretch,
                ..LayoutParameters::default()
            },
        );
        tree.measure(spacer, Size::new(80.0, 60.0));
        assert_eq!(tree.content_size(spacer), Size::new(40.0, 60.0));
    }
}
