//! Shape model: the template catalog and placed shapes.
//!
//! A `ShapeTemplate` is an immutable prototype for one `ShapeKind`. A `Shape`
//! is a placed instance copied from a template, carrying a unique id and a
//! canvas-local position. Shapes are only ever created through
//! [`instantiate`]; afterwards only their position changes.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::consts::{CIRCLE_COLOR, SQUARE_COLOR, TEMPLATE_SIZE_PX, TRIANGLE_COLOR};
use crate::coords::Point;

/// Unique identifier for a placed shape.
pub type ShapeId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("unknown shape kind: {0}")]
    UnknownKind(String),
}

/// The kind of a shape. Drives the fill rule used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Filled rectangle covering the bounding box.
    Square,
    /// Filled ellipse inscribed in the bounding box.
    Circle,
    /// Filled triangle inscribed in the bounding box, apex at top-center.
    Triangle,
}

impl ShapeKind {
    /// Every kind in the catalog, in palette order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Square, ShapeKind::Circle, ShapeKind::Triangle];

    /// Wire tag for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    /// The catalog template for this kind.
    #[must_use]
    pub fn template(self) -> ShapeTemplate {
        let color = match self {
            Self::Square => SQUARE_COLOR,
            Self::Circle => CIRCLE_COLOR,
            Self::Triangle => TRIANGLE_COLOR,
        };
        ShapeTemplate { kind: self, width: TEMPLATE_SIZE_PX, height: TEMPLATE_SIZE_PX, color }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            other => Err(ShapeError::UnknownKind(other.to_owned())),
        }
    }
}

/// Immutable prototype for a shape kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTemplate {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

/// A shape placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRecord")]
pub struct Shape {
    /// Stable identity; the only key used for move and delete.
    pub id: ShapeId,
    /// Shape kind. Older documents call this field `type`; `kind` wins when
    /// both are present.
    pub kind: ShapeKind,
    /// Left edge of the bounding box in canvas-local pixels.
    pub x: f64,
    /// Top edge of the bounding box in canvas-local pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fill color as a CSS color string.
    pub color: String,
}

impl Shape {
    /// Top-left corner of the bounding box.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether both extents are finite and strictly positive.
    #[must_use]
    pub fn has_valid_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Create a shape from the catalog template for `kind`, with a fresh id, at
/// `position`.
#[must_use]
pub fn instantiate(kind: ShapeKind, position: Point) -> Shape {
    let template = kind.template();
    Shape {
        id: Uuid::new_v4(),
        kind,
        x: position.x,
        y: position.y,
        width: template.width,
        height: template.height,
        color: template.color.to_owned(),
    }
}

/// Like [`instantiate`], but looks the template up by its wire tag.
///
/// # Errors
///
/// Returns [`ShapeError::UnknownKind`] if `kind` is not in the catalog.
pub fn instantiate_named(kind: &str, position: Point) -> Result<Shape, ShapeError> {
    let kind = kind.parse::<ShapeKind>()?;
    Ok(instantiate(kind, position))
}

/// Wire form of a shape, before the kind fields are reconciled.
#[derive(Deserialize)]
struct ShapeRecord {
    #[serde(deserialize_with = "deserialize_shape_id")]
    id: ShapeId,
    kind: Option<ShapeKind>,
    #[serde(rename = "type")]
    legacy_kind: Option<ShapeKind>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = String;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        let kind = record.kind.or(record.legacy_kind).ok_or("missing field `kind`")?;
        Ok(Shape {
            id: record.id,
            kind,
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
            color: record.color,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireShapeId {
    Uuid(Uuid),
    Legacy(f64),
}

/// Accept UUID ids, and re-key numeric ids written by older exports.
fn deserialize_shape_id<'de, D>(deserializer: D) -> Result<ShapeId, D::Error>
where
    D: Deserializer<'de>,
{
    match WireShapeId::deserialize(deserializer)? {
        WireShapeId::Uuid(id) => Ok(id),
        WireShapeId::Legacy(_) => Ok(Uuid::new_v4()),
    }
}
