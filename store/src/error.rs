use std::path::PathBuf;

use canvas::scene::SceneError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("username must not be blank")]
    InvalidUsername,
    #[error(transparent)]
    InvalidFormat(#[from] SceneError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a JSON file: {}", .0.display())]
    NotJson(PathBuf),
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
}

impl StoreError {
    /// Whether the error means the user or painting does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
