//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Users and paintings live in one `Registry` behind a single lock so that
//! ownership checks and writes see the same snapshot. Nothing is persisted;
//! a restart starts empty.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use canvas::scene::PaintingDocument;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

// =============================================================================
// STORED PAINTING
// =============================================================================

#[derive(Debug, Clone)]
pub struct StoredPainting {
    pub owner: String,
    pub name: String,
    pub document: PaintingDocument,
    /// Instant of the last create or update.
    pub updated_at: OffsetDateTime,
}

// =============================================================================
// REGISTRY
// =============================================================================

#[derive(Debug, Default)]
pub struct Registry {
    pub users: BTreeSet<String>,
    pub paintings: HashMap<Uuid, StoredPainting>,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum; the registry is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
