use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Favorite joined with the job it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FavoriteJob {
    pub job_id: Uuid,
    pub favorited_at: DateTime<Utc>,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub job_type: String,
    pub salary: Decimal,
    pub deadline: DateTime<Utc>,
    pub status: String,
}
