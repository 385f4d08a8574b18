//! Persistence glue for the painting editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The canvas engine never talks to the network or the filesystem itself.
//! This crate is the collaborator it hands scenes to: a typed client for the
//! remote painting store (`client`), a per-user session that remembers which
//! painting is open (`session`), and local JSON export/import (`file`).
//!
//! ERROR HANDLING
//! ==============
//! Every operation returns [`StoreError`]. Nothing here mutates an engine, so
//! a failed call can never leave a scene half-loaded; callers apply a fetched
//! document only after the call has fully succeeded.

pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod session;
pub mod types;

pub use client::{HttpStore, PaintingStore};
pub use config::StoreConfig;
pub use error::StoreError;
pub use session::PaintingSession;
pub use types::PaintingSummary;
