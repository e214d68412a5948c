// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public identifier, flag and propagation types.

/// Identifier for a view in a [`ViewTree`](crate::ViewTree) (generational).
///
/// Ids stay valid until the view is removed. After that, [`ViewTree::is_alive`]
/// reports `false` even if the slot has been reused by a newer view, so an id can
/// be held across frames without keeping the view alive.
///
/// [`ViewTree::is_alive`]: crate::ViewTree::is_alive
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Interaction flags of a view.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// The view itself can receive focus.
        const FOCUSABLE      = 0b0000_0001;
        /// The view raises drag events.
        const DRAGGABLE      = 0b0000_0010;
        /// The view (and its subtree) receives pointer events.
        const POINTER_EVENTS = 0b0000_0100;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::POINTER_EVENTS
    }
}

/// Result of an event handler or dispatch: whether the event was handled.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// Not handled; keep propagating.
    #[default]
    Continue,
    /// Handled; ancestors and later siblings do not see the event.
    Stop,
}

impl Outcome {
    /// Whether this is [`Outcome::Stop`].
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }

    /// [`Outcome::Stop`] if either outcome is.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        if self.is_stop() || other.is_stop() {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}

impl From<bool> for Outcome {
    fn from(handled: bool) -> Self {
        if handled { Self::Stop } else { Self::Continue }
    }
}
