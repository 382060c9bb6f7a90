use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::site_settings::UpdateSettingsRequest,
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn get_settings(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let settings = state.settings_handler.get().await?;
    Ok(HttpResponse::Ok().json(settings))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_settings(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<UpdateSettingsRequest>,
) -> Result<impl Responder, AppError> {
    let settings = state.settings_handler.update(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(settings))
}
