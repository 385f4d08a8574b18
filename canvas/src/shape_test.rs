#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use serde_json::json;

use super::*;

// =============================================================
// ShapeKind
// =============================================================

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_value(ShapeKind::Square).unwrap(), json!("square"));
    assert_eq!(serde_json::to_value(ShapeKind::Circle).unwrap(), json!("circle"));
    assert_eq!(serde_json::to_value(ShapeKind::Triangle).unwrap(), json!("triangle"));
}

#[test]
fn kind_parses_catalog_tags() {
    for kind in ShapeKind::ALL {
        assert_eq!(kind.as_str().parse::<ShapeKind>().unwrap(), kind);
    }
}

#[test]
fn kind_rejects_unknown_tag() {
    let err = "hexagon".parse::<ShapeKind>().unwrap_err();
    assert_eq!(err, ShapeError::UnknownKind("hexagon".into()));
}

#[test]
fn kind_parse_is_case_sensitive() {
    assert!("Square".parse::<ShapeKind>().is_err());
}

#[test]
fn catalog_templates_are_60_by_60() {
    for kind in ShapeKind::ALL {
        let t = kind.template();
        assert_eq!(t.kind, kind);
        assert_eq!(t.width, 60.0);
        assert_eq!(t.height, 60.0);
    }
}

#[test]
fn catalog_template_colors() {
    assert_eq!(ShapeKind::Square.template().color, "#007bff");
    assert_eq!(ShapeKind::Circle.template().color, "#dc3545");
    assert_eq!(ShapeKind::Triangle.template().color, "#28a745");
}

// =============================================================
// instantiate
// =============================================================

#[test]
fn instantiate_copies_template_and_position() {
    let shape = instantiate(ShapeKind::Circle, Point::new(12.5, 40.0));
    assert_eq!(shape.kind, ShapeKind::Circle);
    assert_eq!(shape.x, 12.5);
    assert_eq!(shape.y, 40.0);
    assert_eq!(shape.width, 60.0);
    assert_eq!(shape.height, 60.0);
    assert_eq!(shape.color, "#dc3545");
    assert!(shape.has_valid_size());
}

#[test]
fn instantiate_ids_unique_under_rapid_calls() {
    let ids: HashSet<ShapeId> = (0..10_000)
        .map(|_| instantiate(ShapeKind::Square, Point::default()).id)
        .collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn instantiate_named_known_kind() {
    let shape = instantiate_named("triangle", Point::new(1.0, 2.0)).unwrap();
    assert_eq!(shape.kind, ShapeKind::Triangle);
    assert_eq!(shape.position(), Point::new(1.0, 2.0));
}

#[test]
fn instantiate_named_unknown_kind_fails() {
    let err = instantiate_named("star", Point::default()).unwrap_err();
    assert!(matches!(err, ShapeError::UnknownKind(ref k) if k == "star"));
}

// =============================================================
// Serde
// =============================================================

#[test]
fn shape_serializes_all_fields_as_plain_values() {
    let shape = instantiate(ShapeKind::Square, Point::new(3.0, 4.0));
    let value = serde_json::to_value(&shape).unwrap();
    assert_eq!(value["id"], json!(shape.id.to_string()));
    assert_eq!(value["kind"], json!("square"));
    assert_eq!(value["x"], json!(3.0));
    assert_eq!(value["y"], json!(4.0));
    assert_eq!(value["width"], json!(60.0));
    assert_eq!(value["height"], json!(60.0));
    assert_eq!(value["color"], json!("#007bff"));
}

#[test]
fn shape_accepts_legacy_type_field() {
    let id = Uuid::new_v4();
    let shape: Shape = serde_json::from_value(json!({
        "id": id.to_string(),
        "type": "circle",
        "x": 1, "y": 2, "width": 60, "height": 60,
        "color": "#dc3545"
    }))
    .unwrap();
    assert_eq!(shape.id, id);
    assert_eq!(shape.kind, ShapeKind::Circle);
}

#[test]
fn shape_with_kind_and_type_prefers_kind() {
    let shape: Shape = serde_json::from_value(json!({
        "id": Uuid::new_v4().to_string(),
        "kind": "triangle",
        "type": "circle",
        "x": 0, "y": 0, "width": 60, "height": 60,
        "color": "#28a745"
    }))
    .unwrap();
    assert_eq!(shape.kind, ShapeKind::Triangle);
}

#[test]
fn shape_without_any_kind_is_rejected() {
    let err = serde_json::from_value::<Shape>(json!({
        "id": Uuid::new_v4().to_string(),
        "x": 0, "y": 0, "width": 60, "height": 60,
        "color": "#28a745"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("kind"));
}

#[test]
fn shape_rekeys_legacy_numeric_id() {
    let shape: Shape = serde_json::from_value(json!({
        "id": 1_700_000_000_000.123_f64,
        "type": "square",
        "x": 0, "y": 0, "width": 60, "height": 60,
        "color": "#007bff"
    }))
    .unwrap();
    assert_eq!(shape.id.get_version_num(), 4);
}

#[test]
fn shape_tolerates_unknown_fields() {
    let shape: Shape = serde_json::from_value(json!({
        "id": Uuid::new_v4().to_string(),
        "kind": "triangle",
        "x": 0, "y": 0, "width": 60, "height": 60,
        "color": "#28a745",
        "opacity": 0.5
    }))
    .unwrap();
    assert_eq!(shape.kind, ShapeKind::Triangle);
}

#[test]
fn shape_missing_field_is_rejected() {
    let result = serde_json::from_value::<Shape>(json!({
        "id": Uuid::new_v4().to_string(),
        "kind": "square",
        "x": 0, "y": 0, "width": 60,
        "color": "#007bff"
    }));
    assert!(result.is_err());
}

#[test]
fn has_valid_size_rejects_zero_and_nan() {
    let mut shape = instantiate(ShapeKind::Square, Point::default());
    shape.width = 0.0;
    assert!(!shape.has_valid_size());
    shape.width = f64::NAN;
    assert!(!shape.has_valid_size());
    shape.width = 10.0;
    shape.height = -1.0;
    assert!(!shape.has_valid_size());
}
