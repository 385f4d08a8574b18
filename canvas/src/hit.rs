#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::Point;
use crate::repo::ShapeRepository;
use crate::shape::{Shape, ShapeId, ShapeKind};

/// Find the topmost shape whose filled outline contains `local`.
///
/// Shapes are tested from the end of the draw order so the shape drawn on top
/// wins when outlines overlap.
#[must_use]
pub fn hit_test(local: Point, repo: &ShapeRepository) -> Option<ShapeId> {
    repo.shapes()
        .iter()
        .rev()
        .find(|shape| contains(shape, local))
        .map(|shape| shape.id)
}

/// Whether `pt` (canvas-local) lies inside the shape's fill.
#[must_use]
pub fn contains(shape: &Shape, pt: Point) -> bool {
    if !in_bounds(shape, pt) {
        return false;
    }
    match shape.kind {
        ShapeKind::Square => true,
        ShapeKind::Circle => {
            let rx = shape.width / 2.0;
            let ry = shape.height / 2.0;
            let dx = (pt.x - (shape.x + rx)) / rx;
            let dy = (pt.y - (shape.y + ry)) / ry;
            dx * dx + dy * dy <= 1.0
        }
        ShapeKind::Triangle => {
            // Apex at top-center, base along the bottom edge.
            let depth = (pt.y - shape.y) / shape.height;
            let half_span = shape.width / 2.0 * depth;
            (pt.x - (shape.x + shape.width / 2.0)).abs() <= half_span
        }
    }
}

fn in_bounds(shape: &Shape, pt: Point) -> bool {
    pt.x >= shape.x && pt.x <= shape.x + shape.width && pt.y >= shape.y && pt.y <= shape.y + shape.height
}
