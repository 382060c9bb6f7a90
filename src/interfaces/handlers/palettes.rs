use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::palette::{NewPaletteRequest, UpdatePaletteRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_palettes(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let palettes = state.palette_handler.list().await?;
    Ok(HttpResponse::Ok().json(palettes))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_palette(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewPaletteRequest>,
) -> Result<impl Responder, AppError> {
    let palette = state.palette_handler.create(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(palette))
}

#[instrument(skip(_claims, state))]
pub async fn get_palette(
    _claims: AdminClaims,
    palette_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&palette_id)?;
    let palette = state.palette_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(palette))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_palette(
    _claims: AdminClaims,
    palette_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdatePaletteRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&palette_id)?;
    let palette = state.palette_handler.update(&id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(palette))
}

#[instrument(skip(_claims, state))]
pub async fn activate_palette(
    _claims: AdminClaims,
    palette_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&palette_id)?;
    let palette = state.palette_handler.activate(&id).await?;
    Ok(HttpResponse::Ok().json(palette))
}

#[instrument(skip(_claims, state))]
pub async fn delete_palette(
    _claims: AdminClaims,
    palette_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&palette_id)?;
    state.palette_handler.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
