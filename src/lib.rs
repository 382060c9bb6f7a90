use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, limiter, mail, templates, utils};

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{NormalizePath, TrailingSlash},
    web, App,
};

use constants::CONTACT_RATE_WINDOW;
use limiter::rate_limiter::SubmissionLimiter;
use mail::Notifier;
use middlewares::{auth::AuthMiddleware, error_pages::error_pages};
use repositories::{
    contact_message::ContactMessageRepository,
    experience::ExperienceRepository,
    palette::PaletteRepository,
    project::ProjectRepository,
    site_settings::SiteSettingsRepository,
    skill::SkillRepository,
    sqlx_repo::{
        SqlxContactMessageRepo, SqlxExperienceRepo, SqlxPaletteRepo, SqlxProjectRepo, SqlxSiteSettingsRepo,
        SqlxSkillRepo,
    },
};
use settings::AppConfig;
use templates::TemplateRenderer;
use use_cases::{
    auth::AdminAuthHandler, contact::ContactHandler, experience::ExperienceHandler, palette::PaletteHandler,
    project::ProjectHandler, site_settings::SiteSettingsHandler, skill::SkillHandler, theme::ThemeResolver,
};

pub struct AppState {
    pub palette_handler: PaletteHandler,
    pub theme_resolver: ThemeResolver,
    pub project_handler: ProjectHandler,
    pub skill_handler: SkillHandler,
    pub experience_handler: ExperienceHandler,
    pub contact_handler: ContactHandler,
    pub settings_handler: SiteSettingsHandler,
    pub auth_handler: AdminAuthHandler,
    pub renderer: TemplateRenderer,
    pub contact_limiter: SubmissionLimiter,
    pub trust_x_forwarded_for: bool,
}

/// Storage backends shared by the handlers.
#[derive(Clone)]
pub struct Repositories {
    pub palettes: Arc<dyn PaletteRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub experiences: Arc<dyn ExperienceRepository>,
    pub messages: Arc<dyn ContactMessageRepository>,
    pub settings: Arc<dyn SiteSettingsRepository>,
}

impl Repositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Repositories {
            palettes: Arc::new(SqlxPaletteRepo::new(pool.clone())),
            projects: Arc::new(SqlxProjectRepo::new(pool.clone())),
            skills: Arc::new(SqlxSkillRepo::new(pool.clone())),
            experiences: Arc::new(SqlxExperienceRepo::new(pool.clone())),
            messages: Arc::new(SqlxContactMessageRepo::new(pool.clone())),
            settings: Arc::new(SqlxSiteSettingsRepo::new(pool)),
        }
    }
}

impl AppState {
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> anyhow::Result<Self> {
        Self::build(config, Repositories::postgres(pool), mail::notifier_from_config(config))
    }

    pub fn build(config: &AppConfig, repos: Repositories, notifier: Arc<dyn Notifier>) -> anyhow::Result<Self> {
        Ok(AppState {
            palette_handler: PaletteHandler::new(repos.palettes.clone()),
            theme_resolver: ThemeResolver::new(repos.settings.clone(), repos.palettes),
            project_handler: ProjectHandler::new(repos.projects),
            skill_handler: SkillHandler::new(repos.skills),
            experience_handler: ExperienceHandler::new(repos.experiences),
            contact_handler: ContactHandler::new(
                repos.messages,
                repos.settings.clone(),
                notifier,
                config.notification_timeout(),
            ),
            settings_handler: SiteSettingsHandler::new(repos.settings),
            auth_handler: AdminAuthHandler::new(config),
            renderer: TemplateRenderer::new()?,
            contact_limiter: SubmissionLimiter::new(config.contact_rate_limit_per_hour, CONTACT_RATE_WINDOW),
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        })
    }
}

/// The application with its routes and request middleware; CORS and request
/// logging are added by the server.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(error_pages())
        .wrap(AuthMiddleware)
        .wrap(NormalizePath::new(TrailingSlash::Always))
        .configure(routes::configure_routes)
}
