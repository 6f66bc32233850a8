//! Handlers for the `/api/users` routes.

use crate::api::ApiError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use geist_users::{CreateUser, User};
use std::sync::Arc;

/// GET /api/users
pub async fn list_users_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = tokio::task::spawn_blocking(move || state.users.list()).await??;
    Ok(Json(users))
}

/// POST /api/users
///
/// The body is decoded as JSON whatever its `Content-Type` says. Decode
/// failures are reported as 400 with the same `{"error": ...}` shape as
/// validation failures.
pub async fn create_user_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let payload: CreateUser = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {}", e)))?;
    let new_user = payload.validate()?;

    let user = tokio::task::spawn_blocking(move || state.users.create(&new_user)).await??;

    tracing::info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/:id
///
/// Identifiers that are not a 64-bit integer cannot match any row and are
/// answered as not found.
pub async fn get_user_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let Ok(id) = id.parse::<i64>() else {
        return Err(ApiError::not_found());
    };

    let user = tokio::task::spawn_blocking(move || state.users.get(id)).await??;
    Ok(Json(user))
}
