use actix_web::{
    dev::ServiceResponse,
    http::{header, StatusCode},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web, HttpResponse, Result,
};

use crate::{use_cases::theme::SiteContext, AppState};

/// Paths that keep their JSON error bodies.
const JSON_PREFIXES: [&str; 2] = ["/api/", "/admin/"];

/// Replaces 404 and 500 responses on HTML routes with the themed error pages.
pub fn error_pages<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::NOT_FOUND, render_error_page)
        .handler(StatusCode::INTERNAL_SERVER_ERROR, render_error_page)
}

fn wants_json(path: &str) -> bool {
    JSON_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn render_error_page<B: 'static>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if wants_json(res.request().path()) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let Some(state) = res.request().app_data::<web::Data<AppState>>().cloned() else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let status = res.status();
    let (req, _) = res.into_parts();

    Ok(ErrorHandlerResponse::Future(Box::pin(async move {
        let site = state.theme_resolver.resolve().await.unwrap_or_else(|e| {
            tracing::warn!("Rendering {} page without site settings: {}", status.as_u16(), e);
            SiteContext::fallback()
        });

        let body = state.renderer.error_page(status, &site);
        let response = HttpResponse::build(status)
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(body);

        Ok(ServiceResponse::new(req, response).map_into_right_body())
    })))
}
