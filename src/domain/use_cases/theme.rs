use std::sync::Arc;

use serde::Serialize;

use crate::{
    entities::{palette::ThemeColors, site_settings::SiteSettings},
    errors::AppError,
    repositories::{palette::PaletteRepository, site_settings::SiteSettingsRepository},
};

/// Values every rendered page receives.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub site: SiteSettings,
    pub theme: ThemeColors,
}

impl SiteContext {
    /// Stock settings and colors, for pages rendered when the database is unreachable.
    pub fn fallback() -> Self {
        SiteContext {
            site: SiteSettings::defaults(),
            theme: ThemeColors::fallback(),
        }
    }
}

pub struct ThemeResolver {
    pub settings_repo: Arc<dyn SiteSettingsRepository>,
    pub palette_repo: Arc<dyn PaletteRepository>,
}

impl ThemeResolver {
    pub fn new(
        settings_repo: Arc<dyn SiteSettingsRepository>,
        palette_repo: Arc<dyn PaletteRepository>,
    ) -> Self {
        ThemeResolver { settings_repo, palette_repo }
    }

    /// Settings plus the palette picked in them, else the first active
    /// palette, else the stock colors. Evaluated on every request.
    pub async fn resolve(&self) -> Result<SiteContext, AppError> {
        let site = self.settings_repo.get_or_create().await?;
        let theme = self.resolve_theme(&site).await?;

        Ok(SiteContext { site, theme })
    }

    async fn resolve_theme(&self, site: &SiteSettings) -> Result<ThemeColors, AppError> {
        if let Some(palette_id) = site.current_palette_id {
            match self.palette_repo.get_palette(&palette_id).await {
                Ok(palette) => return Ok(palette.into()),
                Err(AppError::NotFound(_)) => {
                    tracing::warn!(%palette_id, "Selected palette no longer exists, using the active one");
                }
                Err(e) => return Err(e),
            }
        }

        let theme = self
            .palette_repo
            .first_active_palette()
            .await?
            .map(ThemeColors::from)
            .unwrap_or_else(ThemeColors::fallback);

        Ok(theme)
    }
}
