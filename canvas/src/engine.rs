use tracing::{debug, error, warn};

use crate::consts::DEFAULT_PAINTING_NAME;
use crate::coords::{CanvasRect, Point};
use crate::drag::{ClampPolicy, MoveController};
use crate::hit::hit_test;
use crate::input::{Button, GestureLock};
use crate::placement::PlacementController;
use crate::repo::{RepoError, ShapeCounts, ShapeRepository};
use crate::scene::{self, PaintingDocument, Scene, SceneError};
use crate::shape::{Shape, ShapeError, ShapeId, ShapeKind};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(Shape),
    ShapeMoved { id: ShapeId, x: f64, y: f64 },
    ShapeDeleted { id: ShapeId },
    SceneReplaced,
    NameChanged(String),
    RenderNeeded,
}

/// Deployment-level engine policy. Fixed for the engine's lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Whether dragged shapes are kept inside the canvas.
    pub clamp: ClampPolicy,
    /// Raise a shape to the top of the draw order when it is pressed.
    pub raise_on_press: bool,
}

/// Engine state: the repository, the painting name, both gesture
/// controllers and the lock they share.
pub struct EngineCore {
    pub repo: ShapeRepository,
    pub placement: PlacementController,
    pub moving: MoveController,
    pub lock: GestureLock,
    name: String,
    config: EngineConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            repo: ShapeRepository::new(),
            placement: PlacementController::new(),
            moving: MoveController::new(config.clamp),
            lock: GestureLock::default(),
            name: DEFAULT_PAINTING_NAME.to_owned(),
            config,
        }
    }

    // --- Palette drag (placement) ---

    /// A palette entry started dragging. Returns false if a move gesture is
    /// in progress and the drag was ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnknownKind`] if `kind` is not in the catalog.
    pub fn on_palette_drag_start(&mut self, kind: &str) -> Result<bool, ShapeError> {
        let kind = kind.parse::<ShapeKind>()?;
        Ok(self.placement.begin(kind, &mut self.lock))
    }

    /// The palette drag ended (after a drop, or abandoned).
    pub fn on_palette_drag_end(&mut self) {
        self.placement.cancel(&mut self.lock);
    }

    /// Pointer hovering over the canvas during a palette drag. Returns
    /// whether a drop would be accepted.
    #[must_use]
    pub fn on_drag_over(&self) -> bool {
        self.placement.drag_over()
    }

    /// Palette entry dropped on the canvas at viewport point `pt`.
    pub fn on_drop(&mut self, pt: Point, rect: CanvasRect) -> Vec<Action> {
        match self.placement.drop(pt, rect, &mut self.repo, &mut self.lock) {
            Ok(Some(shape)) => vec![Action::ShapeCreated(shape), Action::RenderNeeded],
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "placement rejected by repository");
                Vec::new()
            }
        }
    }

    // --- Pointer (move) ---

    /// Pointer pressed on the canvas. Hit-tests for the topmost shape under
    /// `pt` and starts dragging it.
    pub fn on_pointer_down(&mut self, pt: Point, rect: CanvasRect, button: Button) -> Vec<Action> {
        let Some(id) = hit_test(rect.to_local(pt), &self.repo) else {
            return Vec::new();
        };
        self.on_shape_pointer_down(id, pt, rect, button)
    }

    /// Pointer pressed on a shape the host already identified.
    pub fn on_shape_pointer_down(&mut self, id: ShapeId, pt: Point, rect: CanvasRect, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if !self.moving.press(id, pt, rect, &self.repo, &mut self.lock) {
            return Vec::new();
        }
        if self.config.raise_on_press && self.repo.bring_to_front(&id) {
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    /// Pointer moved over the canvas.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let Some(id) = self.moving.dragging() else {
            return Vec::new();
        };
        match self.moving.pointer_move(pt, &mut self.repo, &mut self.lock) {
            Some(p) => vec![Action::ShapeMoved { id, x: p.x, y: p.y }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Pointer released.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.moving.release(&mut self.lock);
        Vec::new()
    }

    /// Pointer left the canvas; ends any drag where the shape is.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.moving.leave(&mut self.lock);
        Vec::new()
    }

    /// Double-click on a shape deletes it. Deleting an absent id does
    /// nothing.
    pub fn on_double_click(&mut self, id: &ShapeId) -> Vec<Action> {
        self.moving.forget(id, &mut self.lock);
        match self.repo.remove(id) {
            Some(shape) => {
                debug!(id = %shape.id, kind = %shape.kind, "shape deleted");
                vec![Action::ShapeDeleted { id: shape.id }, Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    // --- Painting name ---

    /// Commit an edited title. Blank titles fall back to the default name.
    pub fn set_name(&mut self, raw: &str) -> Action {
        self.name = scene::normalize_name(raw);
        Action::NameChanged(self.name.clone())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // --- Scene exchange ---

    /// Snapshot of the current scene.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene { name: self.name.clone(), shapes: self.repo.shapes().to_vec() }
    }

    /// Transport document for the current scene, stamped now.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Timestamp`] if the clock cannot be formatted.
    pub fn export_document(&self) -> Result<PaintingDocument, SceneError> {
        scene::to_document(&self.scene())
    }

    /// Replace the whole scene with a decoded document. The name is only
    /// replaced when the document carries one. On error nothing changes.
    ///
    /// Any gesture in progress is ended, since its shape may be gone.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DuplicateId`] if the document repeats an id.
    pub fn load_document(&mut self, doc: PaintingDocument) -> Result<Vec<Action>, RepoError> {
        self.repo.replace_all(doc.shapes)?;
        self.moving.release(&mut self.lock);
        self.placement.cancel(&mut self.lock);

        let mut actions = vec![Action::SceneReplaced];
        if let Some(name) = doc.name {
            self.name = name;
            actions.push(Action::NameChanged(self.name.clone()));
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Parse, validate and load JSON text. On error the scene is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] for malformed text or an invalid document.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<Action>, SceneError> {
        let doc = scene::from_json(text)?;
        self.load_document(doc).map_err(|e| {
            warn!(error = %e, "import rejected");
            SceneError::InvalidFormat(e.to_string())
        })
    }

    // --- Queries ---

    /// Per-kind counts with absent kinds reported as zero.
    #[must_use]
    pub fn counts(&self) -> ShapeCounts {
        ShapeCounts::from_counts(&self.repo.counts_by_kind())
    }

    /// All shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.repo.shapes()
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.repo.get(id)
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }
}
