use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::{
        option_fields::OptionField,
        project::{
            resolve_slug_for_update, Project, ProjectCategory, ProjectFilter, ProjectInsert,
            UpdateProjectRequest,
        },
    },
    errors::AppError,
    repositories::sqlx_repo::{like_pattern, map_unique_violation, push_patch, SqlxProjectRepo},
};

const SLUG_CONSTRAINT: &str = "projects_slug_key";
const SLUG_CONFLICT: &str = "A project with this slug already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Projects in default order (`order` ASC, newest first), optionally windowed.
    async fn list_projects(&self, filter: &ProjectFilter, limit: Option<i64>, offset: i64) -> Result<Vec<Project>, AppError>;
    async fn count_projects(&self, filter: &ProjectFilter) -> Result<i64, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
    /// Same-category projects other than `exclude_id`, in default order.
    async fn related_projects(&self, category: ProjectCategory, exclude_id: &Uuid, limit: i64) -> Result<Vec<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, patch: &UpdateProjectRequest) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProjectFilter) {
    builder.push(" WHERE TRUE");

    if let Some(category) = filter.category {
        builder.push(" AND category = ").push_bind(category);
    }
    if let Some(featured) = filter.featured {
        builder.push(" AND featured = ").push_bind(featured);
    }
    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = like_pattern(term);
        builder.push(" AND (title ILIKE ").push_bind(pattern.clone());
        builder.push(" OR description ILIKE ").push_bind(pattern.clone());
        builder.push(" OR technologies ILIKE ").push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self, filter: &ProjectFilter, limit: Option<i64>, offset: i64) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");
        push_filters(&mut builder, filter);
        builder.push(r#" ORDER BY "order" ASC, created_at DESC"#);

        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        builder.push(" OFFSET ").push_bind(offset.max(0));

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn count_projects(&self, filter: &ProjectFilter) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM projects");
        push_filters(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn related_projects(&self, category: ProjectCategory, exclude_id: &Uuid, limit: i64) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE category = $1 AND id <> $2
            ORDER BY "order" ASC, created_at DESC
            LIMIT $3
            "#,
        )
        .bind(category)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, slug, description, short_description, image, technologies,
                project_url, github_url, category, featured, "order"
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.description)
        .bind(&project.short_description)
        .bind(&project.image)
        .bind(&project.technologies)
        .bind(&project.project_url)
        .bind(&project.github_url)
        .bind(project.category)
        .bind(project.featured)
        .bind(project.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, SLUG_CONSTRAINT, SLUG_CONFLICT))
    }

    async fn update_project(&self, id: &Uuid, patch: &UpdateProjectRequest) -> Result<Project, AppError> {
        let current = self.get_project_by_id(id).await?;

        let slug = resolve_slug_for_update(&patch.slug, &patch.title, &current.slug);
        let title = patch.title.clone().map_value(|t| t.trim().to_string());
        let image = match &patch.image {
            OptionField::SetToValue(v) if v.trim().is_empty() => OptionField::SetToNull,
            other => other.clone(),
        };

        let mut builder = QueryBuilder::new("UPDATE projects SET updated_at = NOW(), slug = ");
        builder.push_bind(slug);
        push_patch(&mut builder, "title", &title);
        push_patch(&mut builder, "description", &patch.description);
        push_patch(&mut builder, "short_description", &patch.short_description);
        push_patch(&mut builder, "image", &image);
        push_patch(&mut builder, "technologies", &patch.technologies);
        push_patch(&mut builder, "project_url", &patch.project_url);
        push_patch(&mut builder, "github_url", &patch.github_url);
        push_patch(&mut builder, "category", &patch.category);
        push_patch(&mut builder, "featured", &patch.featured);
        push_patch(&mut builder, r#""order""#, &patch.order);
        builder.push(" WHERE id = ").push_bind(*id).push(" RETURNING *");

        builder
            .build_query_as::<Project>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, SLUG_CONSTRAINT, SLUG_CONFLICT))?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }
}
