// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-wide configuration: button mapping and change recording.

use smallvec::{SmallVec, smallvec};

/// Opaque identity of an input button, as reported by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Button(pub u32);

/// Abstract meaning of a button press.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ButtonAction {
    /// The button is not mapped to any action.
    None,
    /// Primary action: left mouse, gamepad "A" and similar.
    Primary,
    /// Secondary action: right mouse, gamepad "X" and similar.
    Secondary,
    /// Back out or close.
    Cancel,
}

/// Maps host buttons to [`ButtonAction`]s.
///
/// A button bound to several actions resolves to the first match in the order
/// primary, secondary, cancel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonMap {
    /// Buttons that trigger [`ButtonAction::Primary`].
    pub primary: SmallVec<[Button; 4]>,
    /// Buttons that trigger [`ButtonAction::Secondary`].
    pub secondary: SmallVec<[Button; 4]>,
    /// Buttons that trigger [`ButtonAction::Cancel`].
    pub cancel: SmallVec<[Button; 4]>,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            primary: smallvec![Button(0)],
            secondary: smallvec![Button(1)],
            cancel: smallvec![Button(2)],
        }
    }
}

impl ButtonMap {
    /// Action bound to `button`.
    pub fn action(&self, button: Button) -> ButtonAction {
        if self.primary.contains(&button) {
            ButtonAction::Primary
        } else if self.secondary.contains(&button) {
            ButtonAction::Secondary
        } else if self.cancel.contains(&button) {
            ButtonAction::Cancel
        } else {
            ButtonAction::None
        }
    }
}

/// Configuration shared by every view in a [`ViewTree`](crate::ViewTree).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewTreeConfig {
    /// Button mapping used to raise left/right click events.
    pub buttons: ButtonMap,
    /// Record property changes for [`ViewTree::take_changes`](crate::ViewTree::take_changes).
    pub record_changes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping() {
        let map = ButtonMap::default();
        assert_eq!(map.action(Button(0)), ButtonAction::Primary);
        assert_eq!(map.action(Button(1)), ButtonAction::Secondary);
        assert_eq!(map.action(Button(2)), ButtonAction::Cancel);
        assert_eq!(map.action(Button(7)), ButtonAction::None);
    }

    #[test]
    fn primary_wins_over_other_bindings() {
        let map = ButtonMap {
            primary: smallvec![Button(5)],
            secondary: smallvec![Button(5), Button(6)],
            cancel: SmallVec::new(),
        };
        assert_eq!(map.action(Button(5)), ButtonAction::Primary);
        assert_eq!(map.action(Button(6)), ButtonAction::Secondary);
    }
}
