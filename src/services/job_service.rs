use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{
    is_valid_job_status, is_valid_job_type, Job, JobWithManager, JOB_STATUS_OPEN,
};

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Sort fields exposed on the public listing. Anything else falls back to
/// creation time so caller input never reaches the ORDER BY clause raw.
fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "salary" => "salary",
        "deadline" => "deadline",
        _ => "created_at",
    }
}

fn sort_direction(order: &str) -> &'static str {
    if order.eq_ignore_ascii_case("asc") {
        "ASC"
    } else {
        "DESC"
    }
}

/// Deadlines arrive as strings; accept RFC 3339 or a plain date.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(Error::BadRequest(format!(
        "Invalid deadline date format: {}",
        raw
    )))
}

const JOB_COLUMNS: &str = "id, title, description, job_type, location, salary, deadline, \
     company_name, status, manager_id, is_deleted, created_at, updated_at";

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, manager_id: Uuid, payload: CreateJobPayload) -> Result<Job> {
        let deadline = parse_deadline(&payload.deadline)?;
        let status = payload
            .status
            .unwrap_or_else(|| JOB_STATUS_OPEN.to_string());
        if !is_valid_job_status(&status) {
            return Err(Error::BadRequest(format!("Invalid job status: {}", status)));
        }

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (title, description, job_type, location, salary, deadline, company_name, status, manager_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.job_type)
        .bind(&payload.location)
        .bind(payload.salary)
        .bind(deadline)
        .bind(&payload.company_name)
        .bind(&status)
        .bind(manager_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    /// Public listing: only OPEN jobs with a live deadline, optionally
    /// narrowed by equality filters, paginated and sorted.
    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let mut filters = vec![
            "status = 'OPEN'".to_string(),
            "deadline >= NOW()".to_string(),
            "is_deleted = FALSE".to_string(),
        ];
        let mut args: Vec<String> = Vec::new();

        if let Some(job_type) = query.job_type {
            filters.push(format!("job_type = ${}", args.len() + 1));
            args.push(job_type);
        }
        if let Some(location) = query.location {
            filters.push(format!("location = ${}", args.len() + 1));
            args.push(location);
        }
        if let Some(company_name) = query.company_name {
            filters.push(format!("company_name = ${}", args.len() + 1));
            args.push(company_name);
        }

        let where_clause = format!("WHERE {}", filters.join(" AND "));
        let order_by = format!(
            "ORDER BY {} {}",
            sort_column(query.sort_by.as_deref().unwrap_or("createdAt")),
            sort_direction(query.order.as_deref().unwrap_or("desc")),
        );

        let items_query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs {} {} LIMIT ${} OFFSET ${}",
            where_clause,
            order_by,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(limit).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok(JobList {
            items,
            total,
            page,
            limit,
        })
    }

    /// Every non-deleted job owned by the manager, any status.
    pub async fn list_own(&self, manager_id: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE manager_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        ))
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND is_deleted = FALSE",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn get_owned(&self, manager_id: Uuid, job_id: Uuid) -> Result<Job> {
        let job = self
            .get_by_id(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        if job.manager_id != manager_id {
            return Err(Error::Forbidden(
                "You are not the owner of this job".to_string(),
            ));
        }
        Ok(job)
    }

    /// Owner-only patch. The payload type is the allow-list: ownership and
    /// timestamps are not fields of it and cannot be overwritten.
    pub async fn update(
        &self,
        manager_id: Uuid,
        job_id: Uuid,
        payload: UpdateJobPayload,
    ) -> Result<Job> {
        self.get_owned(manager_id, job_id).await?;

        if let Some(ref job_type) = payload.job_type {
            if !is_valid_job_type(job_type) {
                return Err(Error::BadRequest(format!("Invalid job type: {}", job_type)));
            }
        }
        if let Some(ref status) = payload.status {
            if !is_valid_job_status(status) {
                return Err(Error::BadRequest(format!("Invalid job status: {}", status)));
            }
        }
        let deadline = payload.deadline.as_deref().map(parse_deadline).transpose()?;

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                job_type = COALESCE($4, job_type),
                location = COALESCE($5, location),
                salary = COALESCE($6, salary),
                deadline = COALESCE($7, deadline),
                company_name = COALESCE($8, company_name),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(job_id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.job_type)
        .bind(payload.location)
        .bind(payload.salary)
        .bind(deadline)
        .bind(payload.company_name)
        .bind(payload.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    /// Owner-only soft delete; applications and favorites keep referencing
    /// the row, but it disappears from every listing.
    pub async fn delete(&self, manager_id: Uuid, job_id: Uuid) -> Result<()> {
        self.get_owned(manager_id, job_id).await?;

        sqlx::query("UPDATE jobs SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Admin view: all non-deleted jobs with their manager attached.
    pub async fn list_with_managers(&self) -> Result<Vec<JobWithManager>> {
        let jobs = sqlx::query_as::<_, JobWithManager>(
            r#"
            SELECT
                j.id, j.title, j.job_type, j.location, j.salary, j.deadline,
                j.company_name, j.status, j.manager_id,
                u.name AS manager_name, u.email AS manager_email,
                j.created_at
            FROM jobs j
            JOIN users u ON u.id = j.manager_id
            WHERE j.is_deleted = FALSE
            ORDER BY j.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }
}
