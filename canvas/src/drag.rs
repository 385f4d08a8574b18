//! Move controller: press on a shape, drag it, release.
//!
//! Idle → Dragging on pointer-down over an existing shape. While dragging,
//! each pointer move places the shape at `pointer − grab_offset`, clamped to
//! the canvas when the policy asks for it. Pointer-up and pointer-leave both
//! end the gesture where the shape currently is.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::debug;

use crate::coords::{CanvasRect, Point};
use crate::input::{GestureLock, GestureOwner, MoveState};
use crate::repo::ShapeRepository;
use crate::shape::{Shape, ShapeId};

/// Whether dragged shapes are kept inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// Clamp each axis into `[0, canvas_extent − shape_extent]`.
    #[default]
    Clamp,
    /// Shapes may be dragged past the canvas edges.
    Free,
}

impl ClampPolicy {
    /// Apply the policy to a proposed top-left position.
    #[must_use]
    pub fn apply(self, position: Point, shape: &Shape, rect: &CanvasRect) -> Point {
        match self {
            Self::Free => position,
            Self::Clamp => Point::new(
                clamp_axis(position.x, shape.width, rect.width),
                clamp_axis(position.y, shape.height, rect.height),
            ),
        }
    }
}

/// Clamp into `[0, extent − size]`; a canvas smaller than the shape pins it
/// at 0.
fn clamp_axis(value: f64, size: f64, extent: f64) -> f64 {
    value.min(extent - size).max(0.0)
}

#[derive(Debug, Clone, Default)]
pub struct MoveController {
    state: MoveState,
    policy: ClampPolicy,
}

impl MoveController {
    #[must_use]
    pub fn new(policy: ClampPolicy) -> Self {
        Self { state: MoveState::Idle, policy }
    }

    #[must_use]
    pub fn state(&self) -> MoveState {
        self.state
    }

    #[must_use]
    pub fn policy(&self) -> ClampPolicy {
        self.policy
    }

    /// Id of the shape being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<ShapeId> {
        match self.state {
            MoveState::Dragging { id, .. } => Some(id),
            MoveState::Idle => None,
        }
    }

    /// Pointer pressed on shape `id`. Records the grab offset and the canvas
    /// rect for this gesture.
    ///
    /// Returns false (and stays idle) if the shape does not exist or another
    /// gesture holds the lock.
    pub fn press(
        &mut self,
        id: ShapeId,
        viewport: Point,
        rect: CanvasRect,
        repo: &ShapeRepository,
        lock: &mut GestureLock,
    ) -> bool {
        let Some(shape) = repo.get(&id) else {
            return false;
        };
        if !lock.acquire(GestureOwner::Move) {
            debug!(%id, holder = ?lock.holder(), "drag refused: gesture in progress");
            return false;
        }
        let grab_offset = rect.to_local(viewport) - shape.position();
        self.state = MoveState::Dragging { id, grab_offset, rect };
        debug!(%id, dx = grab_offset.x, dy = grab_offset.y, "drag started");
        true
    }

    /// Pointer moved. Returns the new position of the dragged shape, or
    /// `None` when idle.
    ///
    /// If the dragged shape has vanished (e.g. deleted mid-drag) the gesture
    /// ends.
    pub fn pointer_move(
        &mut self,
        viewport: Point,
        repo: &mut ShapeRepository,
        lock: &mut GestureLock,
    ) -> Option<Point> {
        let MoveState::Dragging { id, grab_offset, rect } = self.state else {
            return None;
        };
        let Some(shape) = repo.get(&id) else {
            self.finish(lock);
            return None;
        };

        let raw = rect.to_local(viewport) - grab_offset;
        let position = self.policy.apply(raw, shape, &rect);
        repo.move_to(&id, position.x, position.y);
        Some(position)
    }

    /// Pointer released.
    pub fn release(&mut self, lock: &mut GestureLock) {
        if let MoveState::Dragging { id, .. } = self.state {
            debug!(%id, "drag ended");
        }
        self.finish(lock);
    }

    /// Pointer left the canvas. Same as a release; the shape is not reverted.
    pub fn leave(&mut self, lock: &mut GestureLock) {
        self.release(lock);
    }

    /// End the gesture if it is dragging `id`. Used when `id` is deleted.
    pub fn forget(&mut self, id: &ShapeId, lock: &mut GestureLock) {
        if self.dragging().as_ref() == Some(id) {
            self.finish(lock);
        }
    }

    fn finish(&mut self, lock: &mut GestureLock) {
        self.state = MoveState::Idle;
        lock.release(GestureOwner::Move);
    }
}
