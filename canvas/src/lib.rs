//! Shape-canvas interaction engine for the painting editor.
//!
//! This crate owns everything between raw host input events and the list of
//! shapes on the canvas: the shape model and template catalog, the ordered
//! shape repository, viewport-to-canvas coordinate translation, hit-testing,
//! the placement (palette drag-and-drop) and move (press-drag-release)
//! gesture state machines, and the document format used for file export and
//! remote persistence. Rendering and I/O stay with the host, which wires
//! events into [`engine::EngineCore`] and applies the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event router and owner of all editor state |
//! | [`shape`] | Shape kinds, template catalog, placed shapes |
//! | [`repo`] | Ordered shape repository and per-kind counts |
//! | [`coords`] | Points and viewport → canvas-local conversion |
//! | [`hit`] | Topmost-shape hit-testing per fill rule |
//! | [`input`] | Gesture states, mouse buttons, the shared gesture lock |
//! | [`placement`] | Palette drag-and-drop controller |
//! | [`drag`] | Move controller and clamping policy |
//! | [`scene`] | Transport document encode/decode, names, export file names |
//! | [`consts`] | Shared constants (template sizes, drop offset, format version) |

pub mod consts;
pub mod coords;
pub mod drag;
pub mod engine;
pub mod hit;
pub mod input;
pub mod placement;
pub mod repo;
pub mod scene;
pub mod shape;
