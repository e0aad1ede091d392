use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::favorite::{Favorite, FavoriteJob};

#[derive(Clone)]
pub struct FavoriteService {
    pool: PgPool,
}

impl FavoriteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add(&self, user_id: Uuid, job_id: Uuid) -> Result<Favorite> {
        let job = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM jobs WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        if job.is_none() {
            return Err(Error::NotFound("Job not found".to_string()));
        }

        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT job_id FROM favorites WHERE user_id = $1 AND job_id = $2",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        if exists.is_some() {
            return Err(Error::Conflict("Job already favorited".to_string()));
        }

        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, job_id)
            VALUES ($1, $2)
            RETURNING user_id, job_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(favorite)
    }

    pub async fn remove(&self, user_id: Uuid, job_id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND job_id = $2")
            .bind(user_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Favorite not found".to_string()));
        }
        Ok(())
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<FavoriteJob>> {
        let favorites = sqlx::query_as::<_, FavoriteJob>(
            r#"
            SELECT
                f.job_id, f.created_at AS favorited_at,
                j.title, j.company_name, j.location, j.job_type, j.salary,
                j.deadline, j.status
            FROM favorites f
            JOIN jobs j ON j.id = f.job_id
            WHERE f.user_id = $1 AND j.is_deleted = FALSE
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }
}
