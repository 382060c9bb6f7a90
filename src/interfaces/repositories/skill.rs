use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::skill::{Skill, SkillCategory, SkillInsert, UpdateSkillRequest},
    errors::AppError,
    repositories::sqlx_repo::{push_patch, SqlxSkillRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Skills ordered by category, then `order`, then name.
    async fn list_skills(&self, category: Option<SkillCategory>, limit: Option<i64>) -> Result<Vec<Skill>, AppError>;
    async fn get_skill(&self, id: &Uuid) -> Result<Skill, AppError>;
    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError>;
    async fn update_skill(&self, id: &Uuid, patch: &UpdateSkillRequest) -> Result<Skill, AppError>;
    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn list_skills(&self, category: Option<SkillCategory>, limit: Option<i64>) -> Result<Vec<Skill>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM skills");

        if let Some(category) = category {
            builder.push(" WHERE category = ").push_bind(category);
        }
        builder.push(r#" ORDER BY category ASC, "order" ASC, name ASC"#);
        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let skills = builder
            .build_query_as::<Skill>()
            .fetch_all(&self.pool)
            .await?;

        Ok(skills)
    }

    async fn get_skill(&self, id: &Uuid) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError> {
        let created = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, category, proficiency, icon, "order")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&skill.name)
        .bind(skill.category)
        .bind(skill.proficiency)
        .bind(&skill.icon)
        .bind(skill.order)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_skill(&self, id: &Uuid, patch: &UpdateSkillRequest) -> Result<Skill, AppError> {
        let name = patch.name.clone().map_value(|n| n.trim().to_string());
        let proficiency = patch.clamped_proficiency();

        let mut builder = QueryBuilder::new("UPDATE skills SET id = id");
        push_patch(&mut builder, "name", &name);
        push_patch(&mut builder, "category", &patch.category);
        push_patch(&mut builder, "proficiency", &proficiency);
        push_patch(&mut builder, "icon", &patch.icon);
        push_patch(&mut builder, r#""order""#, &patch.order);
        builder.push(" WHERE id = ").push_bind(*id).push(" RETURNING *");

        builder
            .build_query_as::<Skill>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Skill not found".into()));
        }

        Ok(())
    }
}
