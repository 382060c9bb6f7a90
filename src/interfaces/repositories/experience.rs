use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::experience::{Experience, NewExperienceRequest, UpdateExperienceRequest},
    errors::AppError,
    repositories::sqlx_repo::{push_patch, SqlxExperienceRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Entries by `order`, then most recent start date first.
    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError>;
    async fn get_experience(&self, id: &Uuid) -> Result<Experience, AppError>;
    async fn create_experience(&self, experience: &NewExperienceRequest) -> Result<Experience, AppError>;
    async fn update_experience(&self, id: &Uuid, patch: &UpdateExperienceRequest) -> Result<Experience, AppError>;
    async fn delete_experience(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let experiences = sqlx::query_as::<_, Experience>(
            r#"SELECT * FROM experiences ORDER BY "order" ASC, start_date DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    async fn get_experience(&self, id: &Uuid) -> Result<Experience, AppError> {
        sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".into()))
    }

    async fn create_experience(&self, experience: &NewExperienceRequest) -> Result<Experience, AppError> {
        let created = sqlx::query_as::<_, Experience>(
            r#"
            INSERT INTO experiences (
                title, company, location, description, start_date, end_date, is_current, "order"
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(experience.title.trim())
        .bind(experience.company.trim())
        .bind(experience.location.trim())
        .bind(&experience.description)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.is_current)
        .bind(experience.order)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_experience(&self, id: &Uuid, patch: &UpdateExperienceRequest) -> Result<Experience, AppError> {
        let mut builder = QueryBuilder::new("UPDATE experiences SET id = id");
        push_patch(&mut builder, "title", &patch.title);
        push_patch(&mut builder, "company", &patch.company);
        push_patch(&mut builder, "location", &patch.location);
        push_patch(&mut builder, "description", &patch.description);
        push_patch(&mut builder, "start_date", &patch.start_date);
        push_patch(&mut builder, "end_date", &patch.end_date);
        push_patch(&mut builder, "is_current", &patch.is_current);
        push_patch(&mut builder, r#""order""#, &patch.order);
        builder.push(" WHERE id = ").push_bind(*id).push(" RETURNING *");

        builder
            .build_query_as::<Experience>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".into()))
    }

    async fn delete_experience(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Experience not found".into()));
        }

        Ok(())
    }
}
