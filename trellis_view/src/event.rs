// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event payloads and per-view handler lists.
//!
//! Payload positions are always local to the view receiving the event. As an
//! event descends, the dispatcher subtracts each child's position from every
//! position in the payload via [`PointerArgs::offset`].
//!
//! Handlers return an [`Outcome`]. The first handler that returns
//! [`Outcome::Stop`] marks the event handled: later handlers on the same view do
//! not run, and the event does not bubble further.

use core::fmt;

use kurbo::{Point, Vec2};
use trellis_layout::Direction;

use crate::config::Button;
use crate::{Outcome, ViewId, ViewTree};

/// Payload shared by every pointer event: a position that moves with the event.
pub trait PointerArgs: Copy + fmt::Debug {
    /// Position of the pointer, local to the receiving view.
    fn position(&self) -> Point;
    /// Copy of this event with every position moved by `distance`.
    #[must_use]
    fn offset(self, distance: Vec2) -> Self;
}

/// A bare pointer position, used by drag and enter/leave events.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub position: Point,
}

/// A button press completed at a position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickEvent {
    /// Pointer position.
    pub position: Point,
    /// The button that was clicked.
    pub button: Button,
}

/// A button went down at a position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ButtonEvent {
    /// Pointer position.
    pub position: Point,
    /// The button that was pressed.
    pub button: Button,
}

/// The pointer moved between two positions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerMoveEvent {
    /// Position before the move.
    pub previous_position: Point,
    /// Position after the move.
    pub position: Point,
}

/// The scroll wheel turned while the pointer was at a position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer position.
    pub position: Point,
    /// Direction of the scroll.
    pub direction: Direction,
}

impl PointerEvent {
    /// Event at `position`.
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

impl ClickEvent {
    /// Click of `button` at `position`.
    pub fn new(position: Point, button: Button) -> Self {
        Self { position, button }
    }
}

impl ButtonEvent {
    /// Press of `button` at `position`.
    pub fn new(position: Point, button: Button) -> Self {
        Self { position, button }
    }
}

impl PointerMoveEvent {
    /// Move from `previous_position` to `position`.
    pub fn new(previous_position: Point, position: Point) -> Self {
        Self {
            previous_position,
            position,
        }
    }
}

impl WheelEvent {
    /// Wheel turn toward `direction` at `position`.
    pub fn new(position: Point, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

impl PointerArgs for PointerEvent {
    fn position(&self) -> Point {
        self.position
    }

    fn offset(self, distance: Vec2) -> Self {
        Self::new(self.position + distance)
    }
}

impl PointerArgs for ClickEvent {
    fn position(&self) -> Point {
        self.position
    }

    fn offset(self, distance: Vec2) -> Self {
        Self::new(self.position + distance, self.button)
    }
}

impl PointerArgs for ButtonEvent {
    fn position(&self) -> Point {
        self.position
    }

    fn offset(self, distance: Vec2) -> Self {
        Self::new(self.position + distance, self.button)
    }
}

impl PointerArgs for PointerMoveEvent {
    fn position(&self) -> Point {
        self.position
    }

    fn offset(self, distance: Vec2) -> Self {
        Self::new(self.previous_position + distance, self.position + distance)
    }
}

impl PointerArgs for WheelEvent {
    fn position(&self) -> Point {
        self.position
    }

    fn offset(self, distance: Vec2) -> Self {
        Self::new(self.position + distance, self.direction)
    }
}

/// A registered event callback.
///
/// Receives the tree (handlers may mutate it, including removing views), the
/// view the handler is attached to, and the event in that view's coordinates.
pub type Handler<E> = Box<dyn FnMut(&mut ViewTree, ViewId, &E) -> Outcome>;

/// Event callbacks attached to one view, in registration order.
#[derive(Default)]
pub struct Handlers {
    pub(crate) button_press: Vec<Handler<ButtonEvent>>,
    pub(crate) click: Vec<Handler<ClickEvent>>,
    pub(crate) left_click: Vec<Handler<ClickEvent>>,
    pub(crate) right_click: Vec<Handler<ClickEvent>>,
    pub(crate) drag_start: Vec<Handler<PointerEvent>>,
    pub(crate) drag: Vec<Handler<PointerEvent>>,
    pub(crate) drag_end: Vec<Handler<PointerEvent>>,
    pub(crate) pointer_enter: Vec<Handler<PointerEvent>>,
    pub(crate) pointer_leave: Vec<Handler<PointerEvent>>,
    pub(crate) wheel: Vec<Handler<WheelEvent>>,
}

macro_rules! handler_registration {
    ($($(#[$doc:meta])* $method:ident => $field:ident: $event:ty;)*) => {
        impl Handlers {
            $(
                $(#[$doc])*
                pub fn $method(
                    &mut self,
                    handler: impl FnMut(&mut ViewTree, ViewId, &$event) -> Outcome + 'static,
                ) -> &mut Self {
                    self.$field.push(Box::new(handler));
                    self
                }
            )*
        }
    };
}

handler_registration! {
    /// A button was pressed over the view and no descendant handled it.
    on_button_press => button_press: ButtonEvent;
    /// The view was clicked and no descendant handled it.
    on_click => click: ClickEvent;
    /// Like [`Handlers::on_click`], only for buttons mapped to the primary action.
    on_left_click => left_click: ClickEvent;
    /// Like [`Handlers::on_click`], only for buttons mapped to the secondary action.
    on_right_click => right_click: ClickEvent;
    /// First drag movement of a draggable view.
    on_drag_start => drag_start: PointerEvent;
    /// Every drag movement of a draggable view, including the first.
    on_drag => drag: PointerEvent;
    /// The drag ended.
    on_drag_end => drag_end: PointerEvent;
    /// The pointer moved into the view.
    on_pointer_enter => pointer_enter: PointerEvent;
    /// The pointer moved out of the view.
    on_pointer_leave => pointer_leave: PointerEvent;
    /// The wheel turned over the view and no descendant handled it.
    on_wheel => wheel: WheelEvent;
}

impl Handlers {
    /// Whether no handler of any kind is registered.
    pub fn is_empty(&self) -> bool {
        self.button_press.is_empty()
            && self.click.is_empty()
            && self.left_click.is_empty()
            && self.right_click.is_empty()
            && self.drag_start.is_empty()
            && self.drag.is_empty()
            && self.drag_end.is_empty()
            && self.pointer_enter.is_empty()
            && self.pointer_leave.is_empty()
            && self.wheel.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("button_press", &self.button_press.len())
            .field("click", &self.click.len())
            .field("left_click", &self.left_click.len())
            .field("right_click", &self.right_click.len())
            .field("drag_start", &self.drag_start.len())
            .field("drag", &self.drag.len())
            .field("drag_end", &self.drag_end.len())
            .field("pointer_enter", &self.pointer_enter.len())
            .field("pointer_leave", &self.pointer_leave.len())
            .field("wheel", &self.wheel.len())
            .finish()
    }
}
