use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse, ResponseError,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

const ADMIN_PREFIX: &str = "/admin/";
const LOGIN_PATH: &str = "/admin/login/";

/// Verifies the bearer token on `/admin/` routes and stores the claims in
/// the request extensions for `AdminClaims`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Rejected admin request: {}", e);
                    return Ok(custom_error_response(req, e.error_response()));
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    if !(path.starts_with(ADMIN_PREFIX) || path == "/admin") {
        return true;
    }

    matches!((path, method), (LOGIN_PATH, "POST"))
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState missing in middleware");
        AuthError::MissingJwtService
    })?;

    let claims = state.auth_handler.jwt_service.decode_jwt(&token)?.claims;
    if !claims.admin {
        return Err(AuthError::Forbidden("Admin access required".into()));
    }

    Ok(claims)
}

fn custom_error_response<B>(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(res).map_into_right_body()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::test_support::mock_state;
    use crate::use_cases::extractors::AdminClaims;

    async fn whoami(claims: AdminClaims) -> HttpResponse {
        HttpResponse::Ok().body(claims.0.sub)
    }

    async fn public() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .wrap(AuthMiddleware)
                    .route("/admin/whoami/", web::get().to(whoami))
                    .route("/admin/login/", web::post().to(public))
                    .route("/projects/", web::get().to(public)),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn public_pages_need_no_token() {
        let app = app!(mock_state());

        let res = test::call_service(&app, test::TestRequest::get().uri("/projects/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(&app, test::TestRequest::post().uri("/admin/login/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn admin_route_without_token_is_unauthorized() {
        let app = app!(mock_state());

        let res = test::call_service(&app, test::TestRequest::get().uri("/admin/whoami/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn admin_route_with_garbage_token_is_unauthorized() {
        let app = app!(mock_state());

        let req = test::TestRequest::get()
            .uri("/admin/whoami/")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn admin_route_with_valid_token_passes_claims() {
        let state = mock_state();
        let token = state.auth_handler.jwt_service.create_admin_token("admin").unwrap();
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/admin/whoami/")
            .insert_header(("Authorization", format!("bearer {token}")))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "admin");
    }

    #[actix_rt::test]
    async fn options_and_login_are_public() {
        assert!(is_public_route("/admin/projects/", "OPTIONS"));
        assert!(is_public_route(LOGIN_PATH, "POST"));
        assert!(!is_public_route(LOGIN_PATH, "GET"));
        assert!(!is_public_route("/admin/", "GET"));
        assert!(is_public_route("/administrator/", "GET"));
    }
}
