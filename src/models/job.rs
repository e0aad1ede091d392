use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const JOB_STATUS_OPEN: &str = "OPEN";
pub const JOB_STATUS_CLOSED: &str = "CLOSED";

pub const JOB_TYPES: [&str; 4] = ["Full-time", "Part-time", "Remote", "Contract"];

pub fn is_valid_job_status(status: &str) -> bool {
    status == JOB_STATUS_OPEN || status == JOB_STATUS_CLOSED
}

pub fn is_valid_job_type(job_type: &str) -> bool {
    JOB_TYPES.contains(&job_type)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub job_type: String,
    pub location: String,
    pub salary: Decimal,
    pub deadline: DateTime<Utc>,
    pub company_name: String,
    pub status: String,
    pub manager_id: Uuid,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin listing row: job joined with its owning manager.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobWithManager {
    pub id: Uuid,
    pub title: String,
    pub job_type: String,
    pub location: String,
    pub salary: Decimal,
    pub deadline: DateTime<Utc>,
    pub company_name: String,
    pub status: String,
    pub manager_id: Uuid,
    pub manager_name: String,
    pub manager_email: String,
    pub created_at: DateTime<Utc>,
}
