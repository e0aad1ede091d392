use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_CANDIDATE: &str = "CANDIDATE";
pub const ROLE_HIRING_MANAGER: &str = "HIRING_MANAGER";
pub const ROLE_ADMIN: &str = "ADMIN";

pub const ROLES: [&str; 3] = [ROLE_CANDIDATE, ROLE_HIRING_MANAGER, ROLE_ADMIN];

pub fn is_valid_role(role: &str) -> bool {
    ROLES.contains(&role)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_blocked: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape for admin listings; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}
