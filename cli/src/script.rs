//! Gesture scripts: line-delimited JSON input events replayed through the
//! engine.
//!
//! Each non-blank line is one event object tagged by `event`, e.g.
//! `{"event":"drop","x":130,"y":230}`. Lines starting with `#` are comments.
//! A `canvas` event sets the canvas rectangle used by later pointer events;
//! until one is seen the rectangle is `0,0,800x600`.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;

use canvas::coords::{CanvasRect, Point};
use canvas::engine::{Action, EngineCore};
use canvas::hit::hit_test;
use canvas::input::Button;
use canvas::shape::{ShapeError, ShapeId};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_CANVAS: CanvasRect = CanvasRect { left: 0.0, top: 0.0, width: 800.0, height: 600.0 };

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: serde_json::Error },
    #[error("line {line}: {source}")]
    Shape { line: usize, source: ShapeError },
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ScriptButton> for Button {
    fn from(b: ScriptButton) -> Self {
        match b {
            ScriptButton::Primary => Button::Primary,
            ScriptButton::Middle => Button::Middle,
            ScriptButton::Secondary => Button::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Canvas { left: f64, top: f64, width: f64, height: f64 },
    PaletteDragStart { kind: String },
    PaletteDragEnd,
    Drop { x: f64, y: f64 },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    ShapePointerDown {
        id: ShapeId,
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    /// Delete by id, or by hit-testing a viewport point.
    DoubleClick {
        #[serde(default)]
        id: Option<ShapeId>,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    Rename { name: String },
}

/// Tally of engine actions produced by a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayReport {
    pub events: usize,
    pub created: usize,
    pub moved: usize,
    pub deleted: usize,
    pub renders: usize,
}

impl ReplayReport {
    fn record(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::ShapeCreated(_) => self.created += 1,
                Action::ShapeMoved { .. } => self.moved += 1,
                Action::ShapeDeleted { .. } => self.deleted += 1,
                Action::RenderNeeded => self.renders += 1,
                Action::SceneReplaced | Action::NameChanged(_) => {}
            }
        }
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns the JSON error for a line that is not a known event.
pub fn parse_line(line: &str) -> Result<Option<ScriptEvent>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Feed every event from `reader` to `engine`.
///
/// Events are applied as they are read; a bad line stops the replay with
/// earlier events already applied.
///
/// # Errors
///
/// [`ScriptError::Parse`] or [`ScriptError::Shape`] with the 1-based line
/// number, or [`ScriptError::Io`].
pub fn replay<R: BufRead>(reader: R, engine: &mut EngineCore) -> Result<ReplayReport, ScriptError> {
    let mut rect = DEFAULT_CANVAS;
    let mut report = ReplayReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let Some(event) = parse_line(&line?).map_err(|source| ScriptError::Parse { line: line_no, source })? else {
            continue;
        };
        debug!(line = line_no, ?event, "replaying");
        let actions = apply(engine, &mut rect, event).map_err(|source| ScriptError::Shape { line: line_no, source })?;
        report.events += 1;
        report.record(&actions);
    }
    Ok(report)
}

fn apply(engine: &mut EngineCore, rect: &mut CanvasRect, event: ScriptEvent) -> Result<Vec<Action>, ShapeError> {
    let actions = match event {
        ScriptEvent::Canvas { left, top, width, height } => {
            *rect = CanvasRect::new(left, top, width, height);
            Vec::new()
        }
        ScriptEvent::PaletteDragStart { kind } => {
            engine.on_palette_drag_start(&kind)?;
            Vec::new()
        }
        ScriptEvent::PaletteDragEnd => {
            engine.on_palette_drag_end();
            Vec::new()
        }
        ScriptEvent::Drop { x, y } => engine.on_drop(Point::new(x, y), *rect),
        ScriptEvent::PointerDown { x, y, button } => engine.on_pointer_down(Point::new(x, y), *rect, button.into()),
        ScriptEvent::ShapePointerDown { id, x, y, button } => {
            engine.on_shape_pointer_down(id, Point::new(x, y), *rect, button.into())
        }
        ScriptEvent::PointerMove { x, y } => engine.on_pointer_move(Point::new(x, y)),
        ScriptEvent::PointerUp => engine.on_pointer_up(),
        ScriptEvent::PointerLeave => engine.on_pointer_leave(),
        ScriptEvent::DoubleClick { id, x, y } => {
            let target = id.or_else(|| match (x, y) {
                (Some(x), Some(y)) => hit_test(rect.to_local(Point::new(x, y)), &engine.repo),
                _ => None,
            });
            match target {
                Some(id) => engine.on_double_click(&id),
                None => Vec::new(),
            }
        }
        ScriptEvent::Rename { name } => vec![engine.set_name(&name)],
    };
    Ok(actions)
}
