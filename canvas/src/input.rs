//! Input model: mouse buttons, the two gesture state machines' states, and
//! the shared gesture lock.
//!
//! `PlacementState` and `MoveState` are the named states of the placement and
//! move controllers. Each active variant carries the gesture context needed
//! until the gesture ends. `GestureLock` is the single active-gesture token:
//! whichever controller starts a gesture holds it until it returns to idle,
//! and the other controller refuses to start meanwhile.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::coords::{CanvasRect, Point};
use crate::shape::{ShapeId, ShapeKind};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// State of the palette drag-and-drop gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementState {
    /// No palette entry is being dragged.
    #[default]
    Idle,
    /// A palette entry is being dragged; a drop on the canvas creates a shape.
    PendingPlacement {
        /// Template being dragged.
        kind: ShapeKind,
    },
}

/// State of the press-and-drag gesture on an existing shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MoveState {
    /// No shape is being dragged.
    #[default]
    Idle,
    /// A shape is following the pointer.
    Dragging {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Pointer position minus shape position at press time. Constant for
        /// the whole gesture so the shape keeps its grab point.
        grab_offset: Point,
        /// Canvas rect sampled at press time; valid only for this gesture.
        rect: CanvasRect,
    },
}

/// Which controller owns the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOwner {
    Placement,
    Move,
}

/// Single active-gesture token shared by the placement and move controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureLock {
    holder: Option<GestureOwner>,
}

impl GestureLock {
    /// Take the lock for `owner`. Succeeds if it is free or already held by
    /// `owner`.
    pub fn acquire(&mut self, owner: GestureOwner) -> bool {
        match self.holder {
            None => {
                self.holder = Some(owner);
                true
            }
            Some(current) => current == owner,
        }
    }

    /// Release the lock if `owner` holds it.
    pub fn release(&mut self, owner: GestureOwner) {
        if self.holder == Some(owner) {
            self.holder = None;
        }
    }

    #[must_use]
    pub fn holder(&self) -> Option<GestureOwner> {
        self.holder
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }
}
