use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, SignupPayload},
    error::{Error, Result},
    utils::{crypto, token},
    AppState,
};

fn issue_for(user: &crate::models::user::User) -> Result<String> {
    let config = crate::config::get_config();
    token::issue_token(user.id, &user.role, &config.jwt_secret, config.jwt_ttl_secs)
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Account created, token issued"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already exists")
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let password_hash = crypto::hash_password(&payload.password)?;
    let user = state
        .user_service
        .create(&payload.name, &payload.email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "account created");

    let token = issue_for(&user)?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, &user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Incorrect password"),
        (status = 403, description = "Account is blocked"),
        (status = 404, description = "Unknown email")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .find_by_email(&payload.email)
        .await?
        .filter(|u| !u.is_deleted)
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !crypto::verify_password(&payload.password, &user.password_hash)? {
        return Err(Error::Unauthorized("Incorrect password".to_string()));
    }
    if user.is_blocked {
        return Err(Error::Forbidden("Account is blocked".to_string()));
    }

    let token = issue_for(&user)?;
    Ok(Json(AuthResponse::new(token, &user)))
}
