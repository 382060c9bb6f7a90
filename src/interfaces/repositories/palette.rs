use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::palette::{ColorPalette, NewPaletteRequest, UpdatePaletteRequest},
    errors::AppError,
    repositories::sqlx_repo::{push_patch, SqlxPaletteRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaletteRepository: Send + Sync {
    /// All palettes, active first then by name.
    async fn list_palettes(&self) -> Result<Vec<ColorPalette>, AppError>;
    async fn get_palette(&self, id: &Uuid) -> Result<ColorPalette, AppError>;
    /// First palette flagged active in the default ordering.
    async fn first_active_palette(&self) -> Result<Option<ColorPalette>, AppError>;
    async fn create_palette(&self, palette: &NewPaletteRequest) -> Result<ColorPalette, AppError>;
    async fn update_palette(&self, id: &Uuid, patch: &UpdatePaletteRequest) -> Result<ColorPalette, AppError>;
    /// Flags `id` active and clears every other palette in one transaction.
    async fn activate_palette(&self, id: &Uuid) -> Result<ColorPalette, AppError>;
    async fn delete_palette(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxPaletteRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPaletteRepo { pool }
    }
}

const DEACTIVATE_OTHERS: &str = "UPDATE color_palettes SET is_active = FALSE WHERE is_active AND id <> $1";

#[async_trait]
impl PaletteRepository for SqlxPaletteRepo {
    async fn list_palettes(&self) -> Result<Vec<ColorPalette>, AppError> {
        let palettes = sqlx::query_as::<_, ColorPalette>(
            "SELECT * FROM color_palettes ORDER BY is_active DESC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(palettes)
    }

    async fn get_palette(&self, id: &Uuid) -> Result<ColorPalette, AppError> {
        sqlx::query_as::<_, ColorPalette>("SELECT * FROM color_palettes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Palette not found".into()))
    }

    async fn first_active_palette(&self) -> Result<Option<ColorPalette>, AppError> {
        let palette = sqlx::query_as::<_, ColorPalette>(
            "SELECT * FROM color_palettes WHERE is_active ORDER BY name ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(palette)
    }

    async fn create_palette(&self, palette: &NewPaletteRequest) -> Result<ColorPalette, AppError> {
        let mut tx = self.pool.begin().await?;

        if palette.is_active {
            sqlx::query("UPDATE color_palettes SET is_active = FALSE WHERE is_active")
                .execute(&mut *tx)
                .await?;
        }

        let created = sqlx::query_as::<_, ColorPalette>(
            r#"
            INSERT INTO color_palettes (
                name, primary_color, secondary_color, accent_color, text_color, background_color, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(palette.name.trim())
        .bind(&palette.primary_color)
        .bind(&palette.secondary_color)
        .bind(&palette.accent_color)
        .bind(&palette.text_color)
        .bind(&palette.background_color)
        .bind(palette.is_active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if created.is_active {
            tracing::info!(palette_id = %created.id, "Palette created as the active theme");
        }
        Ok(created)
    }

    async fn update_palette(&self, id: &Uuid, patch: &UpdatePaletteRequest) -> Result<ColorPalette, AppError> {
        let mut tx = self.pool.begin().await?;

        if patch.activates() {
            sqlx::query(DEACTIVATE_OTHERS).bind(id).execute(&mut *tx).await?;
        }

        let name = patch.name.clone().map_value(|n| n.trim().to_string());

        let mut builder = QueryBuilder::new("UPDATE color_palettes SET id = id");
        push_patch(&mut builder, "name", &name);
        push_patch(&mut builder, "primary_color", &patch.primary_color);
        push_patch(&mut builder, "secondary_color", &patch.secondary_color);
        push_patch(&mut builder, "accent_color", &patch.accent_color);
        push_patch(&mut builder, "text_color", &patch.text_color);
        push_patch(&mut builder, "background_color", &patch.background_color);
        push_patch(&mut builder, "is_active", &patch.is_active);
        builder.push(" WHERE id = ").push_bind(*id).push(" RETURNING *");

        let updated = builder
            .build_query_as::<ColorPalette>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Palette not found".into()))?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn activate_palette(&self, id: &Uuid) -> Result<ColorPalette, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(DEACTIVATE_OTHERS).bind(id).execute(&mut *tx).await?;

        // Dropping the transaction on a miss rolls back the deactivation above
        let activated = sqlx::query_as::<_, ColorPalette>(
            "UPDATE color_palettes SET is_active = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Palette not found".into()))?;

        tx.commit().await?;

        tracing::info!(palette_id = %activated.id, name = %activated.name, "Palette activated");
        Ok(activated)
    }

    async fn delete_palette(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM color_palettes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Palette not found".into()));
        }

        Ok(())
    }
}
