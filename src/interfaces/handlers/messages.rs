use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::contact_message::{MessageFilter, UpdateMessageRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub is_read: Option<bool>,
    pub q: Option<String>,
}

#[instrument(skip(_claims, state))]
pub async fn list_messages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<MessageQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    let filter = MessageFilter {
        is_read: query.is_read,
        search: query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
    };

    let messages = state.contact_handler.list(&filter).await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(_claims, state))]
pub async fn get_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&message_id)?;
    let message = state.contact_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateMessageRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&message_id)?;
    let message = state.contact_handler.mark(&id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(message))
}
