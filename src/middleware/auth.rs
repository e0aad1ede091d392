use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::Error;
use crate::models::user::{ROLE_ADMIN, ROLE_CANDIDATE, ROLE_HIRING_MANAGER};
use crate::utils::token;
use crate::AppState;

/// The authenticated subject of a request, resolved against the users table.
/// Inserted into request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: String,
    pub email: String,
}

fn bearer_token(req: &Request) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("Missing authorization header".to_string()))?;
    let value = header
        .to_str()
        .map_err(|_| Error::Unauthorized("Malformed authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("Unsupported authorization scheme".to_string()))
}

/// Verify the bearer token and resolve it to a live user record.
///
/// Token decoding alone is not enough: the subject must still exist, must not
/// be soft-deleted, and must not be blocked. Role and block changes therefore
/// take effect on the target's next request even though issued tokens are
/// never revoked.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let claims = match bearer_token(&req).and_then(|raw| {
        token::decode_token(raw, &crate::config::get_config().jwt_secret)
    }) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    let Ok(subject_id) = Uuid::parse_str(&claims.sub) else {
        return Error::Unauthorized("Invalid token subject".to_string()).into_response();
    };

    let user = match state.user_service.get_by_id(subject_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Error::Unauthorized("Unknown subject".to_string()).into_response();
        }
        Err(err) => return err.into_response(),
    };

    if user.is_deleted {
        return Error::Unauthorized("Unknown subject".to_string()).into_response();
    }
    if user.is_blocked {
        return Error::Forbidden("Account is blocked".to_string()).into_response();
    }

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        // The record's current role wins over whatever the token was issued
        // with, so admin role changes apply without reissuing tokens.
        role: user.role,
        email: user.email,
    });
    next.run(req).await
}

async fn role_guard(req: Request, next: Next, allowed: &[&str]) -> Response {
    let Some(user) = req.extensions().get::<AuthUser>() else {
        return Error::Unauthorized("Not authenticated".to_string()).into_response();
    };
    if !allowed.iter().any(|role| *role == user.role) {
        return Error::Forbidden("Insufficient role".to_string()).into_response();
    }
    next.run(req).await
}

pub async fn require_candidate(req: Request, next: Next) -> Response {
    role_guard(req, next, &[ROLE_CANDIDATE]).await
}

pub async fn require_hiring_manager(req: Request, next: Next) -> Response {
    role_guard(req, next, &[ROLE_HIRING_MANAGER]).await
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    role_guard(req, next, &[ROLE_ADMIN]).await
}

/// Application status reviews are open to admins and any hiring manager.
pub async fn require_reviewer(req: Request, next: Next) -> Response {
    role_guard(req, next, &[ROLE_ADMIN, ROLE_HIRING_MANAGER]).await
}
