//! Painting routes. Every route is scoped by the `username` query parameter.

#[cfg(test)]
#[path = "paintings_test.rs"]
mod paintings_test;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::scene::PaintingDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::painting_error_to_status;
use crate::services::painting::{self, PaintingSummaryRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub username: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// `GET /api/paintings?username=`: list the user's paintings.
pub async fn list_paintings(
    State(state): State<AppState>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<PaintingSummaryRow>>, StatusCode> {
    let rows = painting::list_paintings(&state, &owner.username)
        .await
        .map_err(painting_error_to_status)?;
    Ok(Json(rows))
}

/// `GET /api/paintings/:id?username=`: fetch one painting document.
pub async fn get_painting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<PaintingDocument>, StatusCode> {
    let doc = painting::get_painting(&state, &owner.username, id)
        .await
        .map_err(painting_error_to_status)?;
    Ok(Json(doc))
}

/// `POST /api/paintings?username=`: store a new painting.
pub async fn create_painting(
    State(state): State<AppState>,
    Query(owner): Query<OwnerQuery>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CreatedResponse>), StatusCode> {
    let id = painting::create_painting(&state, &owner.username, &body)
        .await
        .map_err(painting_error_to_status)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `PUT /api/paintings/:id?username=`: replace a painting.
pub async fn update_painting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(owner): Query<OwnerQuery>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    painting::update_painting(&state, &owner.username, id, &body)
        .await
        .map_err(painting_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
