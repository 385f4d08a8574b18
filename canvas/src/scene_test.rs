#![allow(clippy::float_cmp)]

use proptest::prelude::*;
use serde_json::json;
use time::macros::datetime;
use uuid::Uuid;

use super::*;
use crate::coords::Point;
use crate::shape::{ShapeKind, instantiate};

// =============================================================
// Helpers
// =============================================================

fn sample_scene() -> Scene {
    Scene {
        name: "Sunset".into(),
        shapes: vec![
            instantiate(ShapeKind::Square, Point::new(0.0, 0.0)),
            instantiate(ShapeKind::Circle, Point::new(12.5, 99.75)),
            instantiate(ShapeKind::Triangle, Point::new(-3.0, 440.0)),
        ],
    }
}

fn shape_json(kind: &str) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "kind": kind,
        "x": 1.0, "y": 2.0, "width": 60.0, "height": 60.0,
        "color": "#007bff"
    })
}

// =============================================================
// to_document
// =============================================================

#[test]
fn to_document_fills_metadata() {
    let scene = sample_scene();
    let doc = to_document_at(&scene, datetime!(2024-03-01 12:30:00 UTC)).unwrap();
    assert_eq!(doc.name.as_deref(), Some("Sunset"));
    assert_eq!(doc.shapes, scene.shapes);
    assert_eq!(doc.timestamp.as_deref(), Some("2024-03-01T12:30:00Z"));
    assert_eq!(doc.format_version.as_deref(), Some("1.0"));
}

#[test]
fn to_document_uses_camel_case_keys() {
    let doc = to_document_at(&sample_scene(), datetime!(2024-03-01 12:30:00 UTC)).unwrap();
    let value = serde_json::to_value(&doc).unwrap();
    assert!(value.get("formatVersion").is_some());
    assert!(value.get("format_version").is_none());
    assert!(value["shapes"].is_array());
    assert_eq!(value["shapes"][1]["kind"], json!("circle"));
    assert_eq!(value["shapes"][1]["x"], json!(12.5));
}

#[test]
fn to_document_stamps_current_time() {
    let doc = to_document(&sample_scene()).unwrap();
    let ts = doc.timestamp.unwrap();
    assert!(OffsetDateTime::parse(&ts, &Rfc3339).is_ok());
}

#[test]
fn to_json_pretty_is_indented() {
    let doc = to_document_at(&sample_scene(), datetime!(2024-03-01 12:30:00 UTC)).unwrap();
    let text = to_json_pretty(&doc).unwrap();
    assert!(text.starts_with("{\n  \"name\": \"Sunset\""));
}

// =============================================================
// from_document
// =============================================================

#[test]
fn from_document_roundtrips_shapes() {
    let scene = sample_scene();
    let doc = to_document(&scene).unwrap();
    let value = serde_json::to_value(&doc).unwrap();
    let decoded = from_document(&value).unwrap();
    assert_eq!(decoded.shapes, scene.shapes);
    assert_eq!(decoded.name.as_deref(), Some("Sunset"));
}

#[test]
fn from_document_missing_shapes_is_invalid_format() {
    let err = from_document(&json!({ "name": "x" })).unwrap_err();
    assert!(matches!(err, SceneError::InvalidFormat(_)));
}

#[test]
fn from_document_non_array_shapes_is_invalid_format() {
    let err = from_document(&json!({ "shapes": { "a": 1 } })).unwrap_err();
    assert!(matches!(err, SceneError::InvalidFormat(_)));
}

#[test]
fn from_document_non_object_is_invalid_format() {
    let err = from_document(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, SceneError::InvalidFormat(_)));
}

#[test]
fn from_document_accepts_any_version() {
    let doc = from_document(&json!({ "shapes": [], "formatVersion": "99.1" })).unwrap();
    assert_eq!(doc.format_version.as_deref(), Some("99.1"));
}

#[test]
fn from_document_accepts_legacy_version_key() {
    let doc = from_document(&json!({ "shapes": [], "version": "1.0" })).unwrap();
    assert_eq!(doc.format_version.as_deref(), Some("1.0"));
}

#[test]
fn from_document_tolerates_unknown_fields() {
    let doc = from_document(&json!({
        "shapes": [shape_json("circle")],
        "author": "someone",
        "layers": 3
    }))
    .unwrap();
    assert_eq!(doc.shapes.len(), 1);
}

#[test]
fn from_document_empty_name_is_none() {
    let doc = from_document(&json!({ "name": "", "shapes": [] })).unwrap();
    assert_eq!(doc.name, None);
}

#[test]
fn from_document_rejects_shape_missing_field() {
    let mut bad = shape_json("square");
    bad.as_object_mut().unwrap().remove("color");
    let err = from_document(&json!({ "shapes": [shape_json("circle"), bad] })).unwrap_err();
    assert!(matches!(err, SceneError::InvalidShape { index: 1, .. }));
}

#[test]
fn from_document_rejects_unknown_kind() {
    let err = from_document(&json!({ "shapes": [shape_json("hexagon")] })).unwrap_err();
    assert!(matches!(err, SceneError::InvalidShape { index: 0, .. }));
}

#[test]
fn from_document_rejects_zero_size() {
    let mut bad = shape_json("square");
    bad["width"] = json!(0.0);
    let err = from_document(&json!({ "shapes": [bad] })).unwrap_err();
    assert!(matches!(err, SceneError::InvalidShape { index: 0, .. }));
}

#[test]
fn from_document_rejects_duplicate_ids() {
    let a = shape_json("square");
    let mut b = shape_json("circle");
    b["id"] = a["id"].clone();
    let err = from_document(&json!({ "shapes": [a, b] })).unwrap_err();
    assert!(matches!(err, SceneError::InvalidFormat(_)));
}

#[test]
fn from_document_reads_original_export_format() {
    let doc = from_json(
        r##"{
          "name": "My Painting",
          "shapes": [
            { "type": "square", "width": 60, "height": 60, "color": "#007bff",
              "id": 1718000000000.4521, "x": 10, "y": 20 },
            { "type": "triangle", "width": 60, "height": 60, "color": "#28a745",
              "id": 1718000000001.873, "x": 90, "y": 20 }
          ],
          "timestamp": "2024-06-10T06:13:20.000Z",
          "version": "1.0"
        }"##,
    )
    .unwrap();
    assert_eq!(doc.shapes.len(), 2);
    assert_eq!(doc.shapes[0].kind, ShapeKind::Square);
    assert_eq!(doc.shapes[1].x, 90.0);
    assert_ne!(doc.shapes[0].id, doc.shapes[1].id);
}

#[test]
fn from_document_accepts_shape_with_kind_and_type() {
    let mut entry = shape_json("circle");
    entry["type"] = json!("circle");
    let doc = from_document(&json!({ "name": "Both", "shapes": [entry] })).unwrap();
    assert_eq!(doc.shapes[0].kind, ShapeKind::Circle);
    assert_eq!(doc.name.as_deref(), Some("Both"));
}

#[test]
fn from_json_rejects_malformed_text() {
    let err = from_json("{ not json").unwrap_err();
    assert!(matches!(err, SceneError::Json(_)));
}

// =============================================================
// normalize_name / export_filename
// =============================================================

#[test]
fn normalize_blank_name_to_default() {
    assert_eq!(normalize_name(""), "My Painting");
    assert_eq!(normalize_name("   \t"), "My Painting");
}

#[test]
fn normalize_keeps_non_blank_name_verbatim() {
    assert_eq!(normalize_name("  Sea  "), "  Sea  ");
}

#[test]
fn export_filename_sanitizes_and_lowercases() {
    assert_eq!(export_filename("My Painting!", 1_700_000_000_000), "my_painting__1700000000000.json");
}

#[test]
fn export_filename_replaces_non_ascii() {
    assert_eq!(export_filename("Café 2", 5), "caf__2_5.json");
}

// =============================================================
// Properties
// =============================================================

fn arb_shape() -> impl Strategy<Value = Shape> {
    (0usize..3, -4_000_000i32..4_000_000, -4_000_000i32..4_000_000)
        .prop_map(|(k, x, y)| instantiate(ShapeKind::ALL[k], Point::new(f64::from(x) / 4.0, f64::from(y) / 4.0)))
}

proptest! {
    #[test]
    fn document_roundtrip_is_lossless(name in ".{0,24}", shapes in proptest::collection::vec(arb_shape(), 0..20)) {
        let scene = Scene { name, shapes };
        let doc = to_document(&scene).unwrap();
        let text = to_json_pretty(&doc).unwrap();
        let decoded = from_json(&text).unwrap();
        prop_assert_eq!(decoded.shapes, scene.shapes);
    }
}
