//! User service: registration and existence checks.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use tracing::info;

use super::PaintingError;
use crate::state::AppState;

/// Trim a raw username; blank names are rejected.
///
/// # Errors
///
/// Returns [`PaintingError::InvalidUsername`] for an empty or whitespace name.
pub fn clean_username(raw: &str) -> Result<String, PaintingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PaintingError::InvalidUsername);
    }
    Ok(trimmed.to_owned())
}

/// Whether `raw`, once cleaned, names a registered user.
///
/// # Errors
///
/// Returns [`PaintingError::InvalidUsername`] for a blank name.
pub async fn user_exists(state: &AppState, raw: &str) -> Result<bool, PaintingError> {
    let username = clean_username(raw)?;
    Ok(state.registry.read().await.users.contains(&username))
}

/// Register a new user.
///
/// # Errors
///
/// [`PaintingError::InvalidUsername`] for a blank name,
/// [`PaintingError::UserExists`] if the name is taken.
pub async fn create_user(state: &AppState, raw: &str) -> Result<String, PaintingError> {
    let username = clean_username(raw)?;
    let mut registry = state.registry.write().await;
    if !registry.users.insert(username.clone()) {
        return Err(PaintingError::UserExists(username));
    }
    info!(%username, "user registered");
    Ok(username)
}
