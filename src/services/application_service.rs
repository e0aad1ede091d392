use bytes::Bytes;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationOverview, ApplicationWithJob};
use crate::models::job::JOB_STATUS_OPEN;
use crate::services::job_service::JobService;
use crate::services::resume_store::ResumeStore;

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    store: ResumeStore,
}

const APPLICATION_COLUMNS: &str = "id, job_id, candidate_id, resume_path, status, created_at";

impl ApplicationService {
    pub fn new(pool: PgPool, store: ResumeStore) -> Self {
        Self { pool, store }
    }

    /// Submit an application with its resume.
    ///
    /// Ordering contract: the artifact is persisted first, then the record.
    /// If the record insert fails for any reason, the stored artifact is
    /// deleted before the error is surfaced, so a file never exists without
    /// a row pointing at it.
    pub async fn apply(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        filename: &str,
        resume: &Bytes,
    ) -> Result<Application> {
        let jobs = JobService::new(self.pool.clone());
        let job = jobs
            .get_by_id(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if job.status != JOB_STATUS_OPEN {
            return Err(Error::Gone(
                "Job is no longer accepting applications".to_string(),
            ));
        }
        if Utc::now() > job.deadline {
            return Err(Error::Gone(
                "Job application deadline has passed".to_string(),
            ));
        }

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM applications WHERE job_id = $1 AND candidate_id = $2",
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "You already applied to this job".to_string(),
            ));
        }

        let resume_path = self.store.store(filename, resume).await?;

        let inserted = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (job_id, candidate_id, resume_path)
            VALUES ($1, $2, $3)
            RETURNING {APPLICATION_COLUMNS}
            "#,
        ))
        .bind(job_id)
        .bind(candidate_id)
        .bind(&resume_path)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(application) => Ok(application),
            Err(err) => {
                if let Err(cleanup) = self.store.delete(&resume_path).await {
                    tracing::error!(
                        error = %cleanup,
                        path = %resume_path,
                        "failed to clean up resume after insert failure"
                    );
                }
                Err(err.into())
            }
        }
    }

    pub async fn list_mine(&self, candidate_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT
                a.id, a.job_id, a.status, a.created_at,
                j.title AS job_title, j.company_name, j.location, j.salary,
                j.status AS job_status, j.deadline
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.candidate_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    async fn get_owned(&self, candidate_id: Uuid, application_id: Uuid) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1",
        ))
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        if application.candidate_id != candidate_id {
            return Err(Error::Forbidden(
                "You are not the owner of this application".to_string(),
            ));
        }
        Ok(application)
    }

    /// Withdraw an application: artifact first (absence tolerated), then the
    /// row. Not atomic; a crash in between leaves a row whose file is gone,
    /// which `download` reports as NotFound rather than failing.
    pub async fn delete(&self, candidate_id: Uuid, application_id: Uuid) -> Result<()> {
        let application = self.get_owned(candidate_id, application_id).await?;

        self.store.delete(&application.resume_path).await?;
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(application.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Resolve the stored resume for streaming back to its owner.
    pub async fn open_resume(
        &self,
        candidate_id: Uuid,
        application_id: Uuid,
    ) -> Result<tokio::fs::File> {
        let application = self.get_owned(candidate_id, application_id).await?;
        self.store.open(&application.resume_path).await
    }

    /// Reviewer-side status update. Any admin or hiring manager may review
    /// any application; there is no tie to the job's owning manager.
    pub async fn update_status(&self, application_id: Uuid, status: &str) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications
            SET status = $2
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#,
        ))
        .bind(application_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        Ok(application)
    }

    /// Admin view: every application with job and candidate context.
    pub async fn list_all(&self) -> Result<Vec<ApplicationOverview>> {
        let applications = sqlx::query_as::<_, ApplicationOverview>(
            r#"
            SELECT
                a.id, a.job_id, a.candidate_id, a.status, a.created_at,
                j.title AS job_title, j.company_name,
                u.name AS candidate_name, u.email AS candidate_email
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.candidate_id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }
}
