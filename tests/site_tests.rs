mod test_utils;

use std::sync::Arc;

use portfolio_site::{
    entities::project::ProjectCategory, repositories::sqlx_repo::SqlxProjectRepo,
    use_cases::project::ProjectHandler,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

async fn create_project(app: &TestApp, token: &str, title: &str, category: &str) -> Value {
    let response = app
        .admin_post(
            token,
            "/admin/projects/",
            json!({
                "title": title,
                "description": "Built for the listing tests.",
                "short_description": "Short",
                "technologies": "Rust",
                "category": category
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED, "create {title}");
    response.json().await.unwrap()
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn health_reports_database_ok() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/health/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["database"], "OK");
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn public_pages_render() {
    let app = TestApp::spawn().await;

    for path in ["/", "/projects/", "/projects/?category=mobile&page=1", "/about/", "/contact/", "/contact/success/"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        assert!(response.text().await.unwrap().contains("<html"), "GET {path}");
    }
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn unknown_project_is_404_page() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url(&format!("/projects/missing-{}/", Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("<html"));
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn contact_submission_is_stored_normalized() {
    let app = TestApp::spawn().await;
    let subject = format!("Hello {}", Uuid::new_v4());

    let response = app
        .client
        .post(app.url("/contact/"))
        .form(&[
            ("name", "Ada"),
            ("email", "  USER@Example.COM "),
            ("subject", subject.as_str()),
            ("message", "I would like to work with you."),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/contact/success/");

    let email: String = sqlx::query_scalar("SELECT email FROM contact_messages WHERE subject = $1")
        .bind(&subject)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(email, "user@example.com");
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn api_endpoints_return_json() {
    let app = TestApp::spawn().await;

    let palette: Value = app.client.get(app.url("/api/palette/")).send().await.unwrap().json().await.unwrap();
    assert!(palette["primary_color"].as_str().unwrap().starts_with('#'));

    let skills: Value = app.client.get(app.url("/api/skills/")).send().await.unwrap().json().await.unwrap();
    assert!(skills["skills"].is_array());
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn related_projects_share_category_and_exclude_current() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let marker = Uuid::new_v4().simple().to_string();

    let mut web_slugs = Vec::new();
    for i in 0..5 {
        let created = create_project(&app, &token, &format!("Related Web {i} {marker}"), "web").await;
        web_slugs.push(created["slug"].as_str().unwrap().to_string());
    }
    for i in 0..2 {
        create_project(&app, &token, &format!("Related Mobile {i} {marker}"), "mobile").await;
    }

    let handler = ProjectHandler::new(Arc::new(SqlxProjectRepo::new(app.db_pool.clone())));
    let detail = handler.detail(&web_slugs[0]).await.unwrap();

    assert_eq!(detail.related_projects.len(), 3);
    for related in &detail.related_projects {
        assert_eq!(related.project.category, ProjectCategory::Web);
        assert_ne!(related.project.id, detail.project.project.id);
    }
}

#[actix_rt::test]
#[ignore = "requires a Postgres database at APP_DATABASE_URL"]
async fn category_listing_only_returns_that_category() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let marker = Uuid::new_v4().simple().to_string();

    create_project(&app, &token, &format!("Listing Web {marker}"), "web").await;
    create_project(&app, &token, &format!("Listing Mobile {marker}"), "mobile").await;

    let handler = ProjectHandler::new(Arc::new(SqlxProjectRepo::new(app.db_pool.clone())));
    let listing = handler.list_page(Some("mobile"), Some("1")).await.unwrap();

    assert_eq!(listing.current_category, "mobile");
    assert_eq!(listing.page.number, 1);
    assert!(listing.page.total >= 1);
    assert!(!listing.page.items.is_empty());
    assert!(listing.page.items.iter().all(|view| view.project.category == ProjectCategory::Mobile));

    let response = app.client.get(app.url("/projects/?category=mobile&page=1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
