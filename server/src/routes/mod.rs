//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the painting store's HTTP endpoints under a single Axum
//! router. Every route is JSON; there is no authentication beyond the
//! username carried in the path or query.

pub mod paintings;
pub mod users;

#[cfg(test)]
#[path = "e2e_test.rs"]
mod e2e_test;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::PaintingError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/users/{username}", get(users::check_user))
        .route("/api/paintings", get(paintings::list_paintings).post(paintings::create_painting))
        .route("/api/paintings/{id}", get(paintings::get_painting).put(paintings::update_painting))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub(crate) fn painting_error_to_status(err: PaintingError) -> StatusCode {
    match err {
        PaintingError::UserNotFound(_) | PaintingError::PaintingNotFound(_) => StatusCode::NOT_FOUND,
        PaintingError::UserExists(_) => StatusCode::CONFLICT,
        PaintingError::InvalidUsername | PaintingError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
    }
}
