//! Placement controller: drag a template from the palette, drop it on the
//! canvas, get a new shape.
//!
//! Idle → PendingPlacement on palette drag start; PendingPlacement → Idle on
//! drop (which creates the shape) or on drag end without a drop. Hovering
//! over the canvas never mutates anything.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use tracing::debug;

use crate::consts::DROP_CENTER_OFFSET_PX;
use crate::coords::{CanvasRect, Point};
use crate::input::{GestureLock, GestureOwner, PlacementState};
use crate::repo::{RepoError, ShapeRepository};
use crate::shape::{Shape, ShapeKind, instantiate};

#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    state: PlacementState,
}

impl PlacementController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Start dragging `kind` from the palette.
    ///
    /// Returns false (and stays idle) if another gesture holds the lock. A
    /// second drag start while one is pending replaces the template.
    pub fn begin(&mut self, kind: ShapeKind, lock: &mut GestureLock) -> bool {
        if !lock.acquire(GestureOwner::Placement) {
            debug!(%kind, holder = ?lock.holder(), "placement refused: gesture in progress");
            return false;
        }
        self.state = PlacementState::PendingPlacement { kind };
        debug!(%kind, "placement pending");
        true
    }

    /// Pointer is hovering over the canvas during a palette drag. Returns
    /// whether a drop here would be accepted.
    #[must_use]
    pub fn drag_over(&self) -> bool {
        matches!(self.state, PlacementState::PendingPlacement { .. })
    }

    /// Drop over the canvas. Creates and stores the pending shape, centered
    /// under the cursor, and returns it. A drop with nothing pending is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Propagates [`RepoError`] from the repository. The controller returns
    /// to idle either way.
    pub fn drop(
        &mut self,
        viewport: Point,
        rect: CanvasRect,
        repo: &mut ShapeRepository,
        lock: &mut GestureLock,
    ) -> Result<Option<Shape>, RepoError> {
        let PlacementState::PendingPlacement { kind } = self.state else {
            return Ok(None);
        };
        self.finish(lock);

        let local = rect.to_local(viewport);
        let position = local - Point::new(DROP_CENTER_OFFSET_PX, DROP_CENTER_OFFSET_PX);
        let shape = instantiate(kind, position);
        repo.add(shape.clone())?;
        debug!(id = %shape.id, %kind, x = shape.x, y = shape.y, "shape placed");
        Ok(Some(shape))
    }

    /// The palette drag ended without a drop on the canvas.
    pub fn cancel(&mut self, lock: &mut GestureLock) {
        if self.state != PlacementState::Idle {
            debug!("placement cancelled");
        }
        self.finish(lock);
    }

    fn finish(&mut self, lock: &mut GestureLock) {
        self.state = PlacementState::Idle;
        lock.release(GestureOwner::Placement);
    }
}
