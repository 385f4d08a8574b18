//! Remote painting store client.
//!
//! `PaintingStore` is the seam the session talks to; `HttpStore` is the
//! production implementation over the store's HTTP API. Status mapping and
//! body parsing are plain functions so they test without a server.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::time::Duration;

use async_trait::async_trait;
use canvas::scene::{self, PaintingDocument};
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::types::{CreateUserBody, CreatedPainting, PaintingSummary};

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait]
pub trait PaintingStore: Send + Sync {
    async fn check_user_exists(&self, username: &str) -> Result<bool, StoreError>;
    async fn create_user(&self, username: &str) -> Result<(), StoreError>;
    async fn list_paintings(&self, username: &str) -> Result<Vec<PaintingSummary>, StoreError>;
    async fn get_painting(&self, username: &str, id: Uuid) -> Result<PaintingDocument, StoreError>;
    async fn create_painting(&self, username: &str, doc: &PaintingDocument) -> Result<Uuid, StoreError>;
    async fn update_painting(&self, username: &str, id: Uuid, doc: &PaintingDocument) -> Result<(), StoreError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpStore {
    /// Build a client for the store at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidBaseUrl`] if the URL does not parse or
    /// cannot carry a path, and [`StoreError::HttpClientBuild`] if the TLS
    /// backend fails to initialize.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Any transport error or non-success status.
    pub async fn health(&self) -> Result<(), StoreError> {
        let url = self.endpoint(&["healthz"])?;
        let response = self.http.get(url).send().await?;
        expect_success(response).await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        endpoint(&self.base_url, segments)
    }
}

#[async_trait]
impl PaintingStore for HttpStore {
    async fn check_user_exists(&self, username: &str) -> Result<bool, StoreError> {
        let url = self.endpoint(&["api", "users", username])?;
        let response = self.http.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(status_error(status, response.text().await.unwrap_or_default())),
        }
    }

    async fn create_user(&self, username: &str) -> Result<(), StoreError> {
        let url = self.endpoint(&["api", "users"])?;
        let body = CreateUserBody { username: username.to_owned() };
        let response = self.http.post(url).json(&body).send().await?;
        expect_success(response).await?;
        debug!(%username, "user created");
        Ok(())
    }

    async fn list_paintings(&self, username: &str) -> Result<Vec<PaintingSummary>, StoreError> {
        let url = self.endpoint(&["api", "paintings"])?;
        let response = self.http.get(url).query(&[("username", username)]).send().await?;
        let text = expect_success(response).await?.text().await?;
        parse_summaries(&text)
    }

    async fn get_painting(&self, username: &str, id: Uuid) -> Result<PaintingDocument, StoreError> {
        let url = self.endpoint(&["api", "paintings", &id.to_string()])?;
        let response = self.http.get(url).query(&[("username", username)]).send().await?;
        let text = expect_success(response).await?.text().await?;
        Ok(scene::from_json(&text)?)
    }

    async fn create_painting(&self, username: &str, doc: &PaintingDocument) -> Result<Uuid, StoreError> {
        let url = self.endpoint(&["api", "paintings"])?;
        let response = self.http.post(url).query(&[("username", username)]).json(doc).send().await?;
        let text = expect_success(response).await?.text().await?;
        let id = parse_created(&text)?;
        debug!(%username, %id, shapes = doc.shapes.len(), "painting created");
        Ok(id)
    }

    async fn update_painting(&self, username: &str, id: Uuid, doc: &PaintingDocument) -> Result<(), StoreError> {
        let url = self.endpoint(&["api", "paintings", &id.to_string()])?;
        let response = self.http.put(url).query(&[("username", username)]).json(doc).send().await?;
        expect_success(response).await?;
        debug!(%username, %id, shapes = doc.shapes.len(), "painting updated");
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Append percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, StoreError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| StoreError::InvalidBaseUrl(base.to_string()))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

pub(crate) fn status_error(status: StatusCode, body: String) -> StoreError {
    let message = error_message(&body).unwrap_or(body);
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(message),
        StatusCode::CONFLICT => StoreError::Conflict(message),
        _ => {
            warn!(status = status.as_u16(), %message, "store request failed");
            StoreError::Status { status: status.as_u16(), message }
        }
    }
}

/// Pull `error` out of a `{"error": "..."}` body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(ToOwned::to_owned)
}

pub(crate) fn parse_summaries(text: &str) -> Result<Vec<PaintingSummary>, StoreError> {
    serde_json::from_str(text)
        .map_err(|e| StoreError::InvalidFormat(scene::SceneError::InvalidFormat(format!("painting list: {e}"))))
}

pub(crate) fn parse_created(text: &str) -> Result<Uuid, StoreError> {
    serde_json::from_str::<CreatedPainting>(text)
        .map(|created| created.id)
        .map_err(|e| StoreError::InvalidFormat(scene::SceneError::InvalidFormat(format!("create response: {e}"))))
}
