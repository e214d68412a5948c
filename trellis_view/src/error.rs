// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by the view tree.

use crate::ViewId;

/// Misuse of a [`ViewTree`](crate::ViewTree) API by the caller.
///
/// Lookups that can legitimately find nothing (children at a point, focus
/// targets) return `Option` instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The id refers to a view that has been removed.
    #[error("view {0:?} is no longer alive")]
    Stale(ViewId),
    /// The view exists but its widget is a different type.
    #[error("view {id:?} is not a {expected}")]
    WidgetMismatch {
        /// The view that was looked up.
        id: ViewId,
        /// Type name that was requested.
        expected: &'static str,
    },
    /// The widget is checked out because one of its own hooks is running.
    #[error("view {0:?} is busy in one of its own callbacks")]
    Busy(ViewId),
    /// A decorated property was applied before the decorator had an inner view.
    #[error("decorator {0:?} has no inner view")]
    DecoratorDetached(ViewId),
}
