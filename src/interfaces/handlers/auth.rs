use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{entities::token::LoginRequest, errors::AuthError, AppState};

#[instrument(skip(state, credentials), fields(username = %credentials.username))]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    let response = state.auth_handler.login(credentials.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}
