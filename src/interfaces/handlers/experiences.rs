use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::experience::{NewExperienceRequest, UpdateExperienceRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_experiences(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let experiences = state.experience_handler.list().await?;
    Ok(HttpResponse::Ok().json(experiences))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_experience(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewExperienceRequest>,
) -> Result<impl Responder, AppError> {
    let experience = state.experience_handler.create(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(experience))
}

#[instrument(skip(_claims, state))]
pub async fn get_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    let experience = state.experience_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(experience))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateExperienceRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    let experience = state.experience_handler.update(&id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(experience))
}

#[instrument(skip(_claims, state))]
pub async fn delete_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    state.experience_handler.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
