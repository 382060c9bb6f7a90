use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::skill::{NewSkillRequest, SkillCategory, UpdateSkillRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SkillQuery {
    pub category: Option<SkillCategory>,
}

#[instrument(skip(_claims, state))]
pub async fn list_skills(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<SkillQuery>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list(query.category).await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_skill(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewSkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.create(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(skill))
}

#[instrument(skip(_claims, state))]
pub async fn get_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    let skill = state.skill_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateSkillRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    let skill = state.skill_handler.update(&id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(_claims, state))]
pub async fn delete_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    state.skill_handler.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
