use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::{error::Result, middleware::auth::AuthUser, AppState};

pub async fn favorite_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let favorite = state.favorite_service.add(user.id, job_id).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn unfavorite_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.favorite_service.remove(user.id, job_id).await?;
    Ok(Json(json!({ "message": "Job unfavorited successfully" })))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let favorites = state.favorite_service.list(user.id).await?;
    Ok(Json(json!({ "favorites": favorites })))
}
