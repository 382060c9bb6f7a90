use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use crate::{
    entities::{option_fields::OptionField, site_settings::{SiteSettings, UpdateSettingsRequest}},
    errors::AppError,
    repositories::sqlx_repo::{push_patch, SqlxSiteSettingsRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    /// Returns the settings row, creating it with defaults on first access.
    async fn get_or_create(&self) -> Result<SiteSettings, AppError>;
    async fn update_settings(&self, patch: &UpdateSettingsRequest) -> Result<SiteSettings, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxSiteSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSiteSettingsRepo { pool }
    }
}

#[async_trait]
impl SiteSettingsRepository for SqlxSiteSettingsRepo {
    async fn get_or_create(&self) -> Result<SiteSettings, AppError> {
        // Concurrent first requests race on the unique singleton column; losers no-op
        sqlx::query("INSERT INTO site_settings DEFAULT VALUES ON CONFLICT (singleton) DO NOTHING")
            .execute(&self.pool)
            .await?;

        let settings = sqlx::query_as::<_, SiteSettings>("SELECT * FROM site_settings WHERE singleton")
            .fetch_one(&self.pool)
            .await?;

        Ok(settings)
    }

    async fn update_settings(&self, patch: &UpdateSettingsRequest) -> Result<SiteSettings, AppError> {
        self.get_or_create().await?;

        let site_title = patch.site_title.clone().map_value(|t| t.trim().to_string());
        let author_name = patch.author_name.clone().map_value(|n| n.trim().to_string());
        let email = UpdateSettingsRequest::blank_for_null(&patch.email).map_value(|e| e.trim().to_lowercase());
        let author_image = match &patch.author_image {
            OptionField::SetToValue(v) if v.trim().is_empty() => OptionField::SetToNull,
            other => other.clone(),
        };

        let mut builder = QueryBuilder::new("UPDATE site_settings SET updated_at = NOW()");
        push_patch(&mut builder, "site_title", &site_title);
        push_patch(&mut builder, "site_description", &patch.site_description);
        push_patch(&mut builder, "author_name", &author_name);
        push_patch(&mut builder, "author_bio", &patch.author_bio);
        push_patch(&mut builder, "author_image", &author_image);
        push_patch(&mut builder, "email", &email);
        push_patch(&mut builder, "phone", &UpdateSettingsRequest::blank_for_null(&patch.phone));
        push_patch(&mut builder, "location", &UpdateSettingsRequest::blank_for_null(&patch.location));
        push_patch(&mut builder, "social_links", &patch.social_links_map());
        push_patch(&mut builder, "current_palette_id", &patch.current_palette_id);
        builder.push(" WHERE singleton RETURNING *");

        builder
            .build_query_as::<SiteSettings>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23503") {
                        return AppError::field("current_palette_id", "Palette does not exist");
                    }
                }
                AppError::from(e)
            })
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
