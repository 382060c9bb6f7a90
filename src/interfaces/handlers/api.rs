use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

/// Colors of the active palette, or the built-in defaults when none is active.
#[instrument(skip(state))]
pub async fn active_palette(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let theme = state.palette_handler.active_theme().await?;
    Ok(HttpResponse::Ok().json(theme))
}

#[instrument(skip(state))]
pub async fn skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.api_listing().await?;
    Ok(HttpResponse::Ok().json(skills))
}
