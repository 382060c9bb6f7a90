use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::palette::{ColorPalette, NewPaletteRequest, ThemeColors, UpdatePaletteRequest},
    errors::AppError,
    repositories::palette::PaletteRepository,
};

pub struct PaletteHandler {
    pub palette_repo: Arc<dyn PaletteRepository>,
}

impl PaletteHandler {
    pub fn new(palette_repo: Arc<dyn PaletteRepository>) -> Self {
        PaletteHandler { palette_repo }
    }

    /// Colors for `/api/palette/`: the first active palette, or the stock fallback.
    pub async fn active_theme(&self) -> Result<ThemeColors, AppError> {
        let theme = self
            .palette_repo
            .first_active_palette()
            .await?
            .map(ThemeColors::from)
            .unwrap_or_else(ThemeColors::fallback);

        Ok(theme)
    }

    pub async fn list(&self) -> Result<Vec<ColorPalette>, AppError> {
        self.palette_repo.list_palettes().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<ColorPalette, AppError> {
        self.palette_repo.get_palette(id).await
    }

    pub async fn create(&self, request: NewPaletteRequest) -> Result<ColorPalette, AppError> {
        request.validate()?;
        self.palette_repo.create_palette(&request).await
    }

    pub async fn update(&self, id: &Uuid, request: UpdatePaletteRequest) -> Result<ColorPalette, AppError> {
        request.validate()?;
        self.palette_repo.update_palette(id, &request).await
    }

    pub async fn activate(&self, id: &Uuid) -> Result<ColorPalette, AppError> {
        self.palette_repo.activate_palette(id).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.palette_repo.delete_palette(id).await
    }
}
