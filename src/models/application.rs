use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const APPLICATION_STATUS_PENDING: &str = "PENDING";
pub const APPLICATION_STATUS_REVIEWED: &str = "REVIEWED";
pub const APPLICATION_STATUS_REJECTED: &str = "REJECTED";

pub const APPLICATION_STATUSES: [&str; 3] = [
    APPLICATION_STATUS_PENDING,
    APPLICATION_STATUS_REVIEWED,
    APPLICATION_STATUS_REJECTED,
];

pub fn is_valid_application_status(status: &str) -> bool {
    APPLICATION_STATUSES.contains(&status)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub resume_path: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate-facing listing row: application joined with its job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub salary: Decimal,
    pub job_status: String,
    pub deadline: DateTime<Utc>,
}

/// Admin listing row: application joined with job and candidate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationOverview {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
    pub candidate_name: String,
    pub candidate_email: String,
}
