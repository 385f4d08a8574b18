//! Shared constants for the canvas crate.

// ── Placement ───────────────────────────────────────────────────

/// Offset subtracted from both axes of a drop point so the new shape lands
/// centered under the cursor. Half of the nominal 60×60 template size; it is
/// not derived from the dropped template.
pub const DROP_CENTER_OFFSET_PX: f64 = 30.0;

// ── Templates ───────────────────────────────────────────────────

/// Width and height of every palette template.
pub const TEMPLATE_SIZE_PX: f64 = 60.0;

/// Fill color of the square template.
pub const SQUARE_COLOR: &str = "#007bff";

/// Fill color of the circle template.
pub const CIRCLE_COLOR: &str = "#dc3545";

/// Fill color of the triangle template.
pub const TRIANGLE_COLOR: &str = "#28a745";

// ── Documents ───────────────────────────────────────────────────

/// Schema identifier written into every exported document.
pub const FORMAT_VERSION: &str = "1.0";

/// Name given to a painting that has none (or whose title was cleared).
pub const DEFAULT_PAINTING_NAME: &str = "My Painting";
