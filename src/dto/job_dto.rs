use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::job::{is_valid_job_type, Job};
use crate::services::job_service::JobList;

fn validate_job_type(job_type: &str) -> Result<(), ValidationError> {
    if is_valid_job_type(job_type) {
        Ok(())
    } else {
        Err(ValidationError::new("job_type"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_job_type"))]
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub salary: Decimal,
    pub deadline: String,
    #[validate(length(min = 1))]
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub status: Option<String>,
}

/// The patchable fields of a job. Anything outside this list (owner,
/// timestamps, deletion flag) is dropped at deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub salary: Option<Decimal>,
    pub deadline: Option<String>,
    #[validate(length(min = 1))]
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub items: Vec<Job>,
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            total: value.total,
            page: value.page,
            limit: value.limit,
            items: value.items,
        }
    }
}
