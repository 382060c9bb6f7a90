use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::site_settings::{SiteSettings, UpdateSettingsRequest},
    errors::AppError,
    repositories::site_settings::SiteSettingsRepository,
};

pub struct SiteSettingsHandler {
    pub settings_repo: Arc<dyn SiteSettingsRepository>,
}

impl SiteSettingsHandler {
    pub fn new(settings_repo: Arc<dyn SiteSettingsRepository>) -> Self {
        SiteSettingsHandler { settings_repo }
    }

    pub async fn get(&self) -> Result<SiteSettings, AppError> {
        self.settings_repo.get_or_create().await
    }

    pub async fn update(&self, request: UpdateSettingsRequest) -> Result<SiteSettings, AppError> {
        request.validate()?;

        let settings = self.settings_repo.update_settings(&request).await?;
        tracing::info!("Site settings updated");
        Ok(settings)
    }

    /// Database reachability, reported by `/health/`.
    pub async fn database_available(&self) -> bool {
        match self.settings_repo.check_connection().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Database health check failed: {}", e);
                false
            }
        }
    }
}
