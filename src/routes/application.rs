use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use tokio_util::io::ReaderStream;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{ApplySubmittedResponse, UpdateApplicationStatusPayload},
    error::{Error, Result},
    middleware::auth::AuthUser,
    AppState,
};

pub async fn apply_to_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut resume = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("resume") {
            let filename = field.file_name().unwrap_or("resume.bin").to_string();
            let data = field.bytes().await.map_err(|e| {
                tracing::error!(error = %e, "failed to read resume upload");
                Error::BadRequest("Failed to read file upload".to_string())
            })?;
            if !data.is_empty() {
                resume = Some((filename, data));
            }
        }
    }

    let Some((filename, data)) = resume else {
        return Err(Error::BadRequest(
            "Resume file is required (PDF)".to_string(),
        ));
    };

    let application = state
        .application_service
        .apply(user.id, job_id, &filename, &data)
        .await?;

    tracing::info!(application_id = %application.id, job_id = %job_id, "application submitted");

    Ok((
        StatusCode::CREATED,
        Json(ApplySubmittedResponse {
            message: "Application submitted successfully".to_string(),
            application,
        }),
    ))
}

pub async fn list_my_applications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_mine(user.id).await?;
    Ok(Json(applications))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(user.id, id).await?;
    Ok(Json(json!({ "message": "Application deleted" })))
}

pub async fn download_resume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let file = state.application_service.open_resume(user.id, id).await?;
    let stream = ReaderStream::new(file);

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"resume.pdf\"",
        )
        .body(Body::from_stream(stream))
        .map_err(|e| Error::Internal(format!("failed to build response: {}", e)))?;
    Ok(response)
}

pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(application))
}
