//! Painting service: per-user create, list, fetch and update.
//!
//! DESIGN
//! ======
//! Incoming bodies go through the same strict decoder the editor uses on
//! import, so the store never holds a document the editor would reject.
//! A painting owned by someone else is reported as not found.

#[cfg(test)]
#[path = "painting_test.rs"]
mod painting_test;

use canvas::consts::DEFAULT_PAINTING_NAME;
use canvas::scene::{self, PaintingDocument};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::PaintingError;
use super::user::clean_username;
use crate::state::{AppState, Registry, StoredPainting};

/// Row returned from painting listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintingSummaryRow {
    pub id: Uuid,
    pub name: String,
}

/// Decode and validate a request body.
///
/// # Errors
///
/// Returns [`PaintingError::InvalidDocument`] with the decoder's reason.
pub fn validate_document(body: &Value) -> Result<PaintingDocument, PaintingError> {
    scene::from_document(body).map_err(|e| PaintingError::InvalidDocument(e.to_string()))
}

/// Clean `raw` and confirm the user is registered. Returns the cleaned name.
fn ensure_user(registry: &Registry, raw: &str) -> Result<String, PaintingError> {
    let username = clean_username(raw)?;
    if registry.users.contains(&username) {
        Ok(username)
    } else {
        Err(PaintingError::UserNotFound(username))
    }
}

fn display_name(doc: &PaintingDocument) -> String {
    doc.name.clone().unwrap_or_else(|| DEFAULT_PAINTING_NAME.to_owned())
}

/// List a user's paintings, most recently saved first.
///
/// # Errors
///
/// [`PaintingError::InvalidUsername`] for a blank name,
/// [`PaintingError::UserNotFound`] for an unknown user.
pub async fn list_paintings(state: &AppState, username: &str) -> Result<Vec<PaintingSummaryRow>, PaintingError> {
    let registry = state.registry.read().await;
    let username = ensure_user(&registry, username)?;

    let mut owned: Vec<(&Uuid, &StoredPainting)> =
        registry.paintings.iter().filter(|(_, p)| p.owner == username).collect();
    owned.sort_by(|a, b| b.1.updated_at.cmp(&a.1.updated_at).then_with(|| a.0.cmp(b.0)));

    Ok(owned
        .into_iter()
        .map(|(id, p)| PaintingSummaryRow { id: *id, name: p.name.clone() })
        .collect())
}

/// Fetch one painting.
///
/// # Errors
///
/// [`PaintingError::UserNotFound`] or [`PaintingError::PaintingNotFound`].
pub async fn get_painting(state: &AppState, username: &str, id: Uuid) -> Result<PaintingDocument, PaintingError> {
    let registry = state.registry.read().await;
    let username = ensure_user(&registry, username)?;
    match registry.paintings.get(&id) {
        Some(p) if p.owner == username => Ok(p.document.clone()),
        _ => Err(PaintingError::PaintingNotFound(id)),
    }
}

/// Store a new painting and return its id.
///
/// # Errors
///
/// [`PaintingError::InvalidDocument`] or [`PaintingError::UserNotFound`].
pub async fn create_painting(state: &AppState, username: &str, body: &Value) -> Result<Uuid, PaintingError> {
    let document = validate_document(body)?;
    let mut registry = state.registry.write().await;
    let username = ensure_user(&registry, username)?;

    let id = Uuid::new_v4();
    let name = display_name(&document);
    info!(%username, %id, %name, shapes = document.shapes.len(), "painting created");
    registry.paintings.insert(
        id,
        StoredPainting { owner: username, name, document, updated_at: OffsetDateTime::now_utc() },
    );
    Ok(id)
}

/// Replace an existing painting.
///
/// # Errors
///
/// [`PaintingError::InvalidDocument`], [`PaintingError::UserNotFound`] or
/// [`PaintingError::PaintingNotFound`].
pub async fn update_painting(state: &AppState, username: &str, id: Uuid, body: &Value) -> Result<(), PaintingError> {
    let document = validate_document(body)?;
    let mut registry = state.registry.write().await;
    let username = ensure_user(&registry, username)?;

    let Some(stored) = registry.paintings.get_mut(&id).filter(|p| p.owner == username) else {
        return Err(PaintingError::PaintingNotFound(id));
    };
    stored.name = display_name(&document);
    stored.document = document;
    stored.updated_at = OffsetDateTime::now_utc();
    info!(%username, %id, shapes = stored.document.shapes.len(), "painting updated");
    Ok(())
}
