//! Scene serialization: the transport document used for file export/import
//! and for remote persistence.
//!
//! DESIGN
//! ======
//! `Scene` is the in-memory pair of painting name and ordered shapes.
//! `PaintingDocument` is what goes over the wire and onto disk:
//! `{name, shapes, timestamp, formatVersion}`.
//!
//! ERROR HANDLING
//! ==============
//! Decoding is strict per shape: an entry with a missing or mistyped field,
//! a non-positive size, or a repeated id rejects the whole document. Unknown
//! fields are ignored and any `formatVersion` is accepted.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::consts::{DEFAULT_PAINTING_NAME, FORMAT_VERSION};
use crate::shape::Shape;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid painting format: {0}")]
    InvalidFormat(String),
    #[error("invalid shape at index {index}: {reason}")]
    InvalidShape { index: usize, reason: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// A named, ordered collection of shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: String,
    pub shapes: Vec<Shape>,
}

/// Transport form of a scene. Decoded only through [`from_document`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintingDocument {
    /// Painting name. Absent or empty in a decoded document means "keep the
    /// current name".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shapes in draw order.
    pub shapes: Vec<Shape>,
    /// RFC 3339 instant the document was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Schema identifier. Older documents call this `version`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
}

/// Build the transport document for `scene`, stamped with the current time.
///
/// # Errors
///
/// Returns [`SceneError::Timestamp`] if the clock value cannot be formatted.
pub fn to_document(scene: &Scene) -> Result<PaintingDocument, SceneError> {
    to_document_at(scene, OffsetDateTime::now_utc())
}

/// Build the transport document for `scene`, stamped with `at`.
///
/// # Errors
///
/// Returns [`SceneError::Timestamp`] if `at` cannot be formatted as RFC 3339.
pub fn to_document_at(scene: &Scene, at: OffsetDateTime) -> Result<PaintingDocument, SceneError> {
    Ok(PaintingDocument {
        name: Some(scene.name.clone()),
        shapes: scene.shapes.clone(),
        timestamp: Some(at.format(&Rfc3339)?),
        format_version: Some(FORMAT_VERSION.to_owned()),
    })
}

/// Decode and validate a transport document.
///
/// # Errors
///
/// - [`SceneError::InvalidFormat`] if `doc` is not an object, if `shapes` is
///   missing or not an array, or if two shapes share an id.
/// - [`SceneError::InvalidShape`] if any entry fails to decode or has a
///   non-positive size.
pub fn from_document(doc: &Value) -> Result<PaintingDocument, SceneError> {
    let Some(map) = doc.as_object() else {
        return Err(SceneError::InvalidFormat("document is not an object".into()));
    };
    let Some(entries) = map.get("shapes").and_then(Value::as_array) else {
        return Err(SceneError::InvalidFormat("missing shapes array".into()));
    };

    let mut shapes = Vec::with_capacity(entries.len());
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let shape = Shape::deserialize(entry)
            .map_err(|e| SceneError::InvalidShape { index, reason: e.to_string() })?;
        if !shape.has_valid_size() {
            return Err(SceneError::InvalidShape { index, reason: "width and height must be positive".into() });
        }
        if !seen.insert(shape.id) {
            return Err(SceneError::InvalidFormat(format!("duplicate shape id {}", shape.id)));
        }
        shapes.push(shape);
    }

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned);
    let timestamp = map.get("timestamp").and_then(Value::as_str).map(ToOwned::to_owned);
    let format_version = map
        .get("formatVersion")
        .or_else(|| map.get("version"))
        .and_then(scalar_to_string);

    Ok(PaintingDocument { name, shapes, timestamp, format_version })
}

/// Parse JSON text and validate it as a document.
///
/// # Errors
///
/// Returns [`SceneError::Json`] for malformed JSON, otherwise as
/// [`from_document`].
pub fn from_json(text: &str) -> Result<PaintingDocument, SceneError> {
    let value: Value = serde_json::from_str(text)?;
    from_document(&value)
}

/// Render a document as pretty-printed JSON (two-space indentation).
///
/// # Errors
///
/// Returns [`SceneError::Json`] if serialization fails.
pub fn to_json_pretty(doc: &PaintingDocument) -> Result<String, SceneError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Title-edit commit rule: a blank name falls back to the default.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    if raw.trim().is_empty() {
        DEFAULT_PAINTING_NAME.to_owned()
    } else {
        raw.to_owned()
    }
}

/// File name for an exported painting: non-alphanumerics become `_`, the
/// result is lowercased, and `_<millis>.json` is appended.
#[must_use]
pub fn export_filename(name: &str, millis: u128) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{sanitized}_{millis}.json")
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
