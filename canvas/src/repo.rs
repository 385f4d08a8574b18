//! Shape repository: the ordered, in-memory collection of live shapes.
//!
//! Order is draw order (later entries render on top). The repository is the
//! single source of truth read by the renderer and by the per-kind counters.
//! Every mutation either fully applies or leaves the collection unchanged.

#[cfg(test)]
#[path = "repo_test.rs"]
mod repo_test;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::shape::{Shape, ShapeId, ShapeKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("duplicate shape id: {0}")]
    DuplicateId(ShapeId),
}

/// Ordered store of placed shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeRepository {
    shapes: Vec<Shape>,
}

impl ShapeRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape to the top of the draw order.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DuplicateId`] if a shape with the same id is
    /// already present; the repository is left unchanged.
    pub fn add(&mut self, shape: Shape) -> Result<(), RepoError> {
        if self.index_of(&shape.id).is_some() {
            return Err(RepoError::DuplicateId(shape.id));
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Set the position of a shape. Returns false if the id is absent.
    pub fn move_to(&mut self, id: &ShapeId, x: f64, y: f64) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == *id) else {
            return false;
        };
        shape.x = x;
        shape.y = y;
        true
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    /// Replace the whole sequence, e.g. when a painting is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DuplicateId`] if `shapes` repeats an id; the
    /// current contents are kept.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) -> Result<(), RepoError> {
        let mut seen = HashSet::with_capacity(shapes.len());
        for shape in &shapes {
            if !seen.insert(shape.id) {
                return Err(RepoError::DuplicateId(shape.id));
            }
        }
        self.shapes = shapes;
        Ok(())
    }

    /// Move a shape to the end of the draw order. Returns false if absent.
    pub fn bring_to_front(&mut self, id: &ShapeId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let shape = self.shapes.remove(index);
        self.shapes.push(shape);
        true
    }

    /// Count shapes per kind. Kinds with no shapes are omitted.
    #[must_use]
    pub fn counts_by_kind(&self) -> BTreeMap<ShapeKind, usize> {
        let mut counts = BTreeMap::new();
        for shape in &self.shapes {
            *counts.entry(shape.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Return a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    /// All shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes currently in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the repository holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn index_of(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == *id)
    }
}

/// Per-kind counts as shown in the status footer, with absent kinds as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ShapeCounts {
    pub square: usize,
    pub circle: usize,
    pub triangle: usize,
}

impl ShapeCounts {
    #[must_use]
    pub fn from_counts(counts: &BTreeMap<ShapeKind, usize>) -> Self {
        let of = |kind| counts.get(&kind).copied().unwrap_or(0);
        Self {
            square: of(ShapeKind::Square),
            circle: of(ShapeKind::Circle),
            triangle: of(ShapeKind::Triangle),
        }
    }

    #[must_use]
    pub fn get(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Square => self.square,
            ShapeKind::Circle => self.circle,
            ShapeKind::Triangle => self.triangle,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.square + self.circle + self.triangle
    }
}
