//! Per-user save/load session.
//!
//! A session is bound to one username and remembers the id of the painting
//! currently open. The first save of a new painting creates it remotely and
//! records the returned id; later saves update that id in place.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use canvas::scene::{self, PaintingDocument, Scene};
use tracing::info;
use uuid::Uuid;

use crate::client::PaintingStore;
use crate::error::StoreError;
use crate::types::PaintingSummary;

pub struct PaintingSession<S> {
    store: S,
    username: String,
    painting_id: Option<Uuid>,
}

impl<S: PaintingStore> PaintingSession<S> {
    /// Open a session, registering the user first if the store lacks it.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidUsername`] for a blank name, or any transport error.
    pub async fn login(store: S, username: &str) -> Result<Self, StoreError> {
        let username = clean_username(username)?;
        if !store.check_user_exists(&username).await? {
            match store.create_user(&username).await {
                // Lost a race with another registration; the user now exists.
                Ok(()) | Err(StoreError::Conflict(_)) => {}
                Err(e) => return Err(e),
            }
        }
        info!(%username, "logged in");
        Ok(Self { store, username, painting_id: None })
    }

    /// Open a session for a user that must already exist.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidUsername`] for a blank name, [`StoreError::NotFound`]
    /// if the store has no such user, or any transport error.
    pub async fn login_existing(store: S, username: &str) -> Result<Self, StoreError> {
        let username = clean_username(username)?;
        if !store.check_user_exists(&username).await? {
            return Err(StoreError::NotFound(format!("user {username}")));
        }
        info!(%username, "logged in");
        Ok(Self { store, username, painting_id: None })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Id of the painting the next save will update, if any.
    #[must_use]
    pub fn painting_id(&self) -> Option<Uuid> {
        self.painting_id
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forget the open painting so the next save creates a new one.
    pub fn start_new(&mut self) {
        self.painting_id = None;
    }

    /// # Errors
    ///
    /// Any transport or decoding error from the store.
    pub async fn list(&self) -> Result<Vec<PaintingSummary>, StoreError> {
        self.store.list_paintings(&self.username).await
    }

    /// Save `scene`, creating the painting on first save.
    ///
    /// On failure the remembered id is left as it was.
    ///
    /// # Errors
    ///
    /// Any transport error, or [`StoreError::InvalidFormat`] if the scene
    /// cannot be stamped.
    pub async fn save(&mut self, scene: &Scene) -> Result<Uuid, StoreError> {
        let doc = scene::to_document(scene)?;
        self.save_document(&doc).await
    }

    /// Save an already-built document.
    ///
    /// # Errors
    ///
    /// Any transport error from the store.
    pub async fn save_document(&mut self, doc: &PaintingDocument) -> Result<Uuid, StoreError> {
        let id = match self.painting_id {
            Some(id) => {
                self.store.update_painting(&self.username, id, doc).await?;
                id
            }
            None => self.store.create_painting(&self.username, doc).await?,
        };
        self.painting_id = Some(id);
        info!(username = %self.username, %id, shapes = doc.shapes.len(), "painting saved");
        Ok(id)
    }

    /// Fetch painting `id` and make it the open painting.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown id, any transport error, or
    /// [`StoreError::InvalidFormat`] if the stored document fails validation.
    pub async fn load(&mut self, id: Uuid) -> Result<PaintingDocument, StoreError> {
        let doc = self.store.get_painting(&self.username, id).await?;
        self.painting_id = Some(id);
        info!(username = %self.username, %id, shapes = doc.shapes.len(), "painting loaded");
        Ok(doc)
    }
}

fn clean_username(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidUsername);
    }
    Ok(trimmed.to_owned())
}
