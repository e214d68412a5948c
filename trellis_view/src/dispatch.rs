// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event routing.
//!
//! Events enter at a root view with a position in the root's coordinates and
//! descend to the children under that position, front to back. Each child
//! receives the event translated into its own coordinates. The first child
//! whose subtree returns [`Outcome::Stop`] ends the descent; if none does, the
//! view's own handlers run. Views that are hidden, or that have pointer events
//! disabled, are skipped along with their subtrees.
//!
//! Handlers may mutate the tree, including removing the view they are
//! attached to. Dispatch re-checks liveness after every handler call.

use kurbo::Point;

use crate::config::ButtonAction;
use crate::event::{
    ButtonEvent, ClickEvent, Handler, Handlers, PointerArgs, PointerEvent, PointerMoveEvent,
    WheelEvent,
};
use crate::types::ViewFlags;
use crate::{Outcome, ViewChild, ViewId, ViewTree};

type Slot<E> = fn(&mut Handlers) -> &mut Vec<Handler<E>>;

fn button_press(h: &mut Handlers) -> &mut Vec<Handler<ButtonEvent>> {
    &mut h.button_press
}

fn click(h: &mut Handlers) -> &mut Vec<Handler<ClickEvent>> {
    &mut h.click
}

fn left_click(h: &mut Handlers) -> &mut Vec<Handler<ClickEvent>> {
    &mut h.left_click
}

fn right_click(h: &mut Handlers) -> &mut Vec<Handler<ClickEvent>> {
    &mut h.right_click
}

fn drag_start(h: &mut Handlers) -> &mut Vec<Handler<PointerEvent>> {
    &mut h.drag_start
}

fn drag(h: &mut Handlers) -> &mut Vec<Handler<PointerEvent>> {
    &mut h.drag
}

fn drag_end(h: &mut Handlers) -> &mut Vec<Handler<PointerEvent>> {
    &mut h.drag_end
}

fn pointer_enter(h: &mut Handlers) -> &mut Vec<Handler<PointerEvent>> {
    &mut h.pointer_enter
}

fn pointer_leave(h: &mut Handlers) -> &mut Vec<Handler<PointerEvent>> {
    &mut h.pointer_leave
}

fn wheel(h: &mut Handlers) -> &mut Vec<Handler<WheelEvent>> {
    &mut h.wheel
}

impl ViewTree {
    /// Route a click. After the `click` handlers, `left_click` or
    /// `right_click` handlers run when the button maps to the primary or
    /// secondary action.
    pub fn dispatch_click(&mut self, id: ViewId, event: ClickEvent) -> Outcome {
        if !self.is_visible(id) {
            return Outcome::Continue;
        }
        if self
            .dispatch_to_children(id, event, Self::dispatch_click)
            .is_stop()
        {
            return Outcome::Stop;
        }
        let outcome = self.raise(id, click, &event);
        match self.config().buttons.action(event.button) {
            ButtonAction::Primary => outcome.or(self.raise(id, left_click, &event)),
            ButtonAction::Secondary => outcome.or(self.raise(id, right_click, &event)),
            ButtonAction::Cancel | ButtonAction::None => outcome,
        }
    }

    /// Route a button press.
    pub fn dispatch_button_press(&mut self, id: ViewId, event: ButtonEvent) -> Outcome {
        if !self.is_visible(id) {
            return Outcome::Continue;
        }
        if self
            .dispatch_to_children(id, event, Self::dispatch_button_press)
            .is_stop()
        {
            return Outcome::Stop;
        }
        self.raise(id, button_press, &event)
    }

    /// Route a wheel turn.
    pub fn dispatch_wheel(&mut self, id: ViewId, event: WheelEvent) -> Outcome {
        if !self.is_visible(id) {
            return Outcome::Continue;
        }
        if self
            .dispatch_to_children(id, event, Self::dispatch_wheel)
            .is_stop()
        {
            return Outcome::Stop;
        }
        self.raise(id, wheel, &event)
    }

    /// Route a drag movement.
    ///
    /// The child hit by the first movement captures the drag: later movements
    /// and the drop go to that child at its current position, even if the
    /// pointer has left it. A draggable view raises `drag_start` once, then
    /// `drag` on every movement that no descendant handled.
    pub fn dispatch_drag(&mut self, id: ViewId, event: PointerEvent) -> Outcome {
        if !self.is_visible(id) {
            return Outcome::Continue;
        }
        if let Some(child) = self.dragging_child(id, event.position)
            && self
                .dispatch_drag(child.view, event.offset(-child.position.to_vec2()))
                .is_stop()
        {
            return Outcome::Stop;
        }
        let Some(core) = self.core(id) else {
            return Outcome::Continue;
        };
        if !core.is_draggable() {
            return Outcome::Continue;
        }
        let mut outcome = Outcome::Continue;
        if !core.is_dragging {
            outcome = self.raise(id, drag_start, &event);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.core.is_dragging = true;
        }
        outcome.or(self.raise(id, drag, &event))
    }

    /// Route the end of a drag and release capture.
    pub fn dispatch_drop(&mut self, id: ViewId, event: PointerEvent) -> Outcome {
        if !self.is_visible(id) {
            return Outcome::Continue;
        }
        let mut outcome = Outcome::Continue;
        if let Some(child) = self.dragging_child(id, event.position) {
            outcome = self.dispatch_drop(child.view, event.offset(-child.position.to_vec2()));
        }
        let Some(n) = self.node_opt_mut(id) else {
            return outcome;
        };
        n.core.dragging_view = None;
        if outcome.is_stop() || !n.core.is_dragging {
            return outcome;
        }
        n.core.is_dragging = false;
        self.raise(id, drag_end, &event)
    }

    /// Route a pointer movement and raise enter/leave.
    ///
    /// If the child under the previous position differs from the one under the
    /// current position, the old child also receives the movement so it can
    /// raise its own leave. When the view's content has scrolled since the last
    /// movement, the previous position is corrected by the scroll distance
    /// before hit testing children.
    pub fn dispatch_pointer_move(&mut self, id: ViewId, event: PointerMoveEvent) -> Outcome {
        if !self.is_visible(id) {
            return Outcome::Continue;
        }
        let layout_offset = self
            .widget_dyn(id)
            .map(|widget| widget.layout_offset())
            .unwrap_or_default();
        let Some(n) = self.node_opt_mut(id) else {
            return Outcome::Continue;
        };
        let mut dispatched = event;
        if layout_offset != n.core.previous_layout_offset {
            dispatched.previous_position =
                event.previous_position - n.core.previous_layout_offset + layout_offset;
        }
        n.core.previous_layout_offset = layout_offset;

        let previous_target = self.child_at(id, dispatched.previous_position);
        let current_target = self.child_at(id, event.position);
        if let Some(previous) = previous_target
            && current_target != previous_target
            && self.pointer_move_to(previous, dispatched).is_stop()
        {
            return Outcome::Stop;
        }
        if let Some(current) = current_target
            && self.pointer_move_to(current, dispatched).is_stop()
        {
            return Outcome::Stop;
        }

        let was_inside = self.contains_point(id, event.previous_position);
        let is_inside = self.contains_point(id, event.position);
        let pointer = PointerEvent::new(event.position);
        if is_inside && !was_inside {
            self.raise(id, pointer_enter, &pointer)
        } else if was_inside && !is_inside {
            self.raise(id, pointer_leave, &pointer)
        } else {
            Outcome::Continue
        }
    }

    fn pointer_move_to(&mut self, child: ViewChild, event: PointerMoveEvent) -> Outcome {
        self.dispatch_pointer_move(child.view, event.offset(-child.position.to_vec2()))
    }

    fn dispatch_to_children<E: PointerArgs>(
        &mut self,
        id: ViewId,
        event: E,
        dispatch: fn(&mut Self, ViewId, E) -> Outcome,
    ) -> Outcome {
        for child in self.children_at(id, event.position()) {
            if !self.flags(child.view).contains(ViewFlags::POINTER_EVENTS) {
                continue;
            }
            if dispatch(self, child.view, event.offset(-child.position.to_vec2())).is_stop() {
                return Outcome::Stop;
            }
        }
        Outcome::Continue
    }

    fn dragging_child(&mut self, id: ViewId, position: Point) -> Option<ViewChild> {
        if let Some(dragging) = self.core(id)?.dragging_view {
            let position = self.child_position(id, dragging)?;
            return Some(ViewChild::new(dragging, position));
        }
        let child = self
            .children_at(id, position)
            .into_iter()
            .find(|child| self.flags(child.view).contains(ViewFlags::POINTER_EVENTS))?;
        if let Some(n) = self.node_opt_mut(id) {
            n.core.dragging_view = Some(child.view);
        }
        Some(child)
    }

    /// Run the handlers in one slot of `id` until one stops the event.
    ///
    /// The list is moved out while handlers run so they can borrow the tree
    /// mutably; handlers registered meanwhile are appended afterward.
    fn raise<E: 'static>(&mut self, id: ViewId, slot: Slot<E>, event: &E) -> Outcome {
        let Some(n) = self.node_opt_mut(id) else {
            return Outcome::Continue;
        };
        let mut handlers = core::mem::take(slot(&mut n.handlers));
        if handlers.is_empty() {
            return Outcome::Continue;
        }
        let mut outcome = Outcome::Continue;
        for handler in &mut handlers {
            if handler(self, id, event).is_stop() {
                outcome = Outcome::Stop;
                break;
            }
        }
        if let Some(n) = self.node_opt_mut(id) {
            let current = slot(&mut n.handlers);
            let added = core::mem::replace(current, handlers);
            current.extend(added);
        }
        outcome
    }
}
