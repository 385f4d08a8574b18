//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and registry access so route handlers can
//! stay focused on protocol translation.

pub mod painting;
pub mod user;

/// Errors shared by the user and painting services.
#[derive(Debug, thiserror::Error)]
pub enum PaintingError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("user already exists: {0}")]
    UserExists(String),
    #[error("painting not found: {0}")]
    PaintingNotFound(uuid::Uuid),
    #[error("username must not be blank")]
    InvalidUsername,
    #[error("invalid painting document: {0}")]
    InvalidDocument(String),
}
