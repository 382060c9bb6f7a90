use actix_web::{http::StatusCode, HttpResponse};
use anyhow::Context as _;
use serde::Serialize;
use tera::{Context, Tera};

use crate::{domain::use_cases::theme::SiteContext, errors::AppError};

/// Page templates compiled into the binary.
const TEMPLATES: [(&str, &str); 9] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("projects.html", include_str!("../../templates/projects.html")),
    ("project_detail.html", include_str!("../../templates/project_detail.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("contact.html", include_str!("../../templates/contact.html")),
    ("success.html", include_str!("../../templates/success.html")),
    ("404.html", include_str!("../../templates/404.html")),
    ("500.html", include_str!("../../templates/500.html")),
];

/// Minimal page used when a template itself fails to render.
const BARE_ERROR_PAGE: &str =
    "<!DOCTYPE html><html><head><title>Server error</title></head><body><h1>Server error</h1></body></html>";

#[derive(Debug)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Loads the embedded templates; `.html` names get HTML autoescaping.
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .context("failed to compile page templates")?;

        Ok(TemplateRenderer { tera })
    }

    /// Renders `template` with the site context plus `page` values merged in.
    pub fn render<T: Serialize>(&self, template: &str, site: &SiteContext, page: &T) -> Result<String, AppError> {
        let mut context = Context::from_serialize(page)?;
        context.insert("site", &site.site);
        context.insert("theme", &site.theme);

        Ok(self.tera.render(template, &context)?)
    }

    pub fn page<T: Serialize>(
        &self,
        status: StatusCode,
        template: &str,
        site: &SiteContext,
        page: &T,
    ) -> Result<HttpResponse, AppError> {
        let body = self.render(template, site, page)?;
        Ok(HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body))
    }

    /// Error pages must not fail themselves; a template error degrades to a bare page.
    pub fn error_page(&self, status: StatusCode, site: &SiteContext) -> String {
        let template = if status == StatusCode::NOT_FOUND { "404.html" } else { "500.html" };

        self.render(template, site, &serde_json::json!({ "status": status.as_u16() }))
            .unwrap_or_else(|e| {
                tracing::error!("Failed to render error page: {}", e);
                BARE_ERROR_PAGE.to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::contact_message::ContactForm;
    use std::collections::BTreeMap;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new().unwrap()
    }

    #[test]
    fn all_templates_compile() {
        let renderer = renderer();
        let names: Vec<_> = renderer.tera.get_template_names().collect();
        assert_eq!(names.len(), TEMPLATES.len());
    }

    #[test]
    fn pages_receive_site_and_theme() {
        let html = renderer()
            .render("success.html", &SiteContext::fallback(), &serde_json::json!({}))
            .unwrap();

        assert!(html.contains("Portfolio"));
        assert!(html.contains("#007bff"));
    }

    #[test]
    fn submitted_values_are_escaped() {
        let form = ContactForm {
            name: "<script>alert(1)</script>".into(),
            ..ContactForm::default()
        };
        let html = renderer()
            .render(
                "contact.html",
                &SiteContext::fallback(),
                &serde_json::json!({ "form": form, "errors": BTreeMap::<String, String>::new() }),
            )
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_pages_render() {
        let renderer = renderer();
        let not_found = renderer.error_page(StatusCode::NOT_FOUND, &SiteContext::fallback());
        let server_error = renderer.error_page(StatusCode::INTERNAL_SERVER_ERROR, &SiteContext::fallback());

        assert!(not_found.contains("404"));
        assert!(server_error.contains("500"));
    }
}
