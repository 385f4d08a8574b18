#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either viewport or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// On-screen bounding box of the canvas element, in viewport pixels.
///
/// The host samples this at the start of every gesture (drop, pointer-down)
/// because scrolling or reflow between gestures moves the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a viewport point to canvas-local coordinates.
    #[must_use]
    pub fn to_local(&self, viewport: Point) -> Point {
        Point {
            x: viewport.x - self.left,
            y: viewport.y - self.top,
        }
    }

    /// Convert a canvas-local point back to viewport coordinates.
    #[must_use]
    pub fn to_viewport(&self, local: Point) -> Point {
        Point {
            x: local.x + self.left,
            y: local.y + self.top,
        }
    }

    /// Whether a viewport point falls inside the canvas (edges inclusive).
    #[must_use]
    pub fn contains(&self, viewport: Point) -> bool {
        let local = self.to_local(viewport);
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.width && local.y <= self.height
    }
}
