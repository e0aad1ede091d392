use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{dto::admin_dto::UpdateUserRolePayload, error::Result, AppState};

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list().await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRolePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.set_role(id, &payload.role).await?;
    tracing::info!(user_id = %id, role = %payload.role, "role updated");
    Ok(Json(json!({ "message": "Role updated", "user": user })))
}

pub async fn toggle_block_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.toggle_block(id).await?;
    let message = if user.is_blocked {
        "User blocked"
    } else {
        "User unblocked"
    };
    Ok(Json(json!({ "message": message, "user": user })))
}

pub async fn soft_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.soft_delete(id).await?;
    tracing::info!(user_id = %id, "user soft deleted");
    Ok(Json(json!({ "message": "User soft deleted" })))
}

pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_with_managers().await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn list_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_all().await?;
    Ok(Json(json!({ "applications": applications })))
}
