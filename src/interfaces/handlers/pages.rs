use std::collections::BTreeMap;

use actix_web::{http::{header, StatusCode}, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::{
    entities::contact_message::ContactForm,
    errors::AppError,
    use_cases::contact::ContactOutcome,
    utils::get_client_ip::get_client_ip,
    AppState,
};

pub const CONTACT_SUCCESS_PATH: &str = "/contact/success/";

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub category: Option<String>,
    pub page: Option<String>,
}

#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let site = state.theme_resolver.resolve().await?;
    let featured_projects = state.project_handler.featured().await?;
    let skills = state.skill_handler.highlighted().await?;
    let skills_by_category = state.skill_handler.grouped().await?;

    state.renderer.page(
        StatusCode::OK,
        "home.html",
        &site,
        &json!({
            "featured_projects": featured_projects,
            "skills": skills,
            "skills_by_category": skills_by_category,
        }),
    )
}

#[instrument(skip(state, query))]
pub async fn projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectsQuery>,
) -> Result<impl Responder, AppError> {
    let site = state.theme_resolver.resolve().await?;
    let listing = state
        .project_handler
        .list_page(query.category.as_deref(), query.page.as_deref())
        .await?;

    state.renderer.page(StatusCode::OK, "projects.html", &site, &listing)
}

#[instrument(skip(state, slug))]
pub async fn project_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let site = state.theme_resolver.resolve().await?;
    let detail = state.project_handler.detail(&slug).await?;

    state.renderer.page(StatusCode::OK, "project_detail.html", &site, &detail)
}

#[instrument(skip(state))]
pub async fn about(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let site = state.theme_resolver.resolve().await?;
    let experiences = state.experience_handler.timeline().await?;
    let skills_by_category = state.skill_handler.grouped().await?;

    state.renderer.page(
        StatusCode::OK,
        "about.html",
        &site,
        &json!({
            "experiences": experiences,
            "skills_by_category": skills_by_category,
        }),
    )
}

#[instrument(skip(state))]
pub async fn contact_form(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let site = state.theme_resolver.resolve().await?;

    render_contact(&state, &site, StatusCode::OK, &ContactForm::default(), &BTreeMap::new(), None)
}

#[instrument(skip(req, state, form))]
pub async fn contact_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<ContactForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let client_ip = get_client_ip(&req, state.trust_x_forwarded_for);

    if state.contact_limiter.is_limited(&client_ip) {
        tracing::warn!(%client_ip, "Contact submission rate limited");
        let site = state.theme_resolver.resolve().await?;
        return render_contact(
            &state,
            &site,
            StatusCode::TOO_MANY_REQUESTS,
            &form,
            &BTreeMap::new(),
            Some("Too many messages sent. Please try again later."),
        );
    }

    match state.contact_handler.submit(form.clone()).await? {
        ContactOutcome::Accepted(_) => {
            state.contact_limiter.record(&client_ip);
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, CONTACT_SUCCESS_PATH))
                .finish())
        }
        ContactOutcome::Rejected(errors) => {
            let site = state.theme_resolver.resolve().await?;
            render_contact(&state, &site, StatusCode::OK, &form, &errors, None)
        }
    }
}

#[instrument(skip(state))]
pub async fn contact_success(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let site = state.theme_resolver.resolve().await?;

    state.renderer.page(StatusCode::OK, "success.html", &site, &json!({}))
}

fn render_contact(
    state: &AppState,
    site: &crate::use_cases::theme::SiteContext,
    status: StatusCode,
    form: &ContactForm,
    errors: &BTreeMap<String, String>,
    form_error: Option<&str>,
) -> Result<HttpResponse, AppError> {
    state.renderer.page(
        status,
        "contact.html",
        site,
        &json!({
            "form": form,
            "errors": errors,
            "form_error": form_error,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    use crate::entities::site_settings::SiteSettings;
    use crate::test_support::{mock_state_with, stored_message, MockRepositories};

    fn with_site(mut mocks: MockRepositories) -> MockRepositories {
        mocks.settings.expect_get_or_create().returning(|| Ok(SiteSettings::defaults()));
        mocks.palettes.expect_first_active_palette().returning(|| Ok(None));
        mocks
    }

    fn contact_post(body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/contact/")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body.to_string())
    }

    async fn body_text(res: actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>) -> String {
        String::from_utf8(test::read_body(res).await.to_vec()).unwrap()
    }

    #[actix_rt::test]
    async fn valid_contact_submission_redirects_to_success() {
        let mut mocks = with_site(MockRepositories::default());
        mocks.messages
            .expect_create_message()
            .withf(|m| m.email == "user@example.com")
            .times(1)
            .returning(|m| Ok(stored_message(m)));
        let app = test::init_service(crate::create_app(mock_state_with(mocks))).await;

        let res = test::call_service(
            &app,
            contact_post("name=Ada&email=+USER%40Example.COM+&subject=Hi&message=I+would+like+to+talk.").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), CONTACT_SUCCESS_PATH);
    }

    #[actix_rt::test]
    async fn invalid_contact_submission_rerenders_form() {
        let mut mocks = with_site(MockRepositories::default());
        mocks.messages.expect_create_message().never();
        let app = test::init_service(crate::create_app(mock_state_with(mocks))).await;

        let res = test::call_service(&app, contact_post("name=Ada&email=ada%40example.com&subject=Hi&message=short").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("value=\"Ada\""));
        assert!(body.contains("class=\"error\""));
    }

    const VALID_CONTACT: &str = "name=Ada&email=ada%40example.com&subject=Hi&message=I+would+like+to+talk.";

    #[actix_rt::test]
    async fn accepted_contact_submissions_are_rate_limited() {
        let mut mocks = with_site(MockRepositories::default());
        mocks.messages
            .expect_create_message()
            .times(5)
            .returning(|m| Ok(stored_message(m)));
        let app = test::init_service(crate::create_app(mock_state_with(mocks))).await;

        for _ in 0..5 {
            let res = test::call_service(&app, contact_post(VALID_CONTACT).to_request()).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
        }

        let res = test::call_service(&app, contact_post(VALID_CONTACT).to_request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_rt::test]
    async fn rejected_submissions_do_not_count_toward_limit() {
        let mut mocks = with_site(MockRepositories::default());
        mocks.messages
            .expect_create_message()
            .times(1)
            .returning(|m| Ok(stored_message(m)));
        let app = test::init_service(crate::create_app(mock_state_with(mocks))).await;

        for _ in 0..6 {
            let res = test::call_service(&app, contact_post("message=short").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = test::call_service(&app, contact_post(VALID_CONTACT).to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_rt::test]
    async fn unknown_project_slug_is_not_found_page() {
        let mut mocks = with_site(MockRepositories::default());
        mocks.projects
            .expect_get_project_by_slug()
            .returning(|_| Err(AppError::NotFound("Project not found".into())));
        let app = test::init_service(crate::create_app(mock_state_with(mocks))).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/projects/nope/").to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(body_text(res).await.contains("<html"));
    }

    #[actix_rt::test]
    async fn paths_without_trailing_slash_are_served() {
        let app = test::init_service(crate::create_app(mock_state_with(with_site(MockRepositories::default())))).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/contact/success").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
