//! User routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::painting_error_to_status;
use crate::services::user;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserBody {
    pub username: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub username: String,
}

/// `GET /api/users/:username`: 200 if the user exists, 404 otherwise. The
/// name is trimmed the same way registration trims it.
pub async fn check_user(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<UserResponse>, StatusCode> {
    let username = user::clean_username(&raw).map_err(painting_error_to_status)?;
    if user::user_exists(&state, &username).await.map_err(painting_error_to_status)? {
        Ok(Json(UserResponse { username }))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// `POST /api/users`: register a user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<UserResponse>), StatusCode> {
    let username = user::create_user(&state, &body.username)
        .await
        .map_err(painting_error_to_status)?;
    Ok((StatusCode::CREATED, Json(UserResponse { username })))
}
