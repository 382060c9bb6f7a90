//! Fixtures shared by the unit tests.

use std::sync::Arc;

use actix_web::web;
use chrono::{NaiveDate, Utc};
use slug::slugify;
use uuid::Uuid;

use crate::{
    entities::{
        contact_message::{ContactMessage, NewContactMessage},
        experience::Experience,
        palette::ColorPalette,
        project::{ProjectCategory, Project},
        skill::{SkillCategory, Skill, DEFAULT_ICON},
    },
    mail::MockNotifier,
    repositories::{
        contact_message::MockContactMessageRepository, experience::MockExperienceRepository,
        palette::MockPaletteRepository, project::MockProjectRepository,
        site_settings::MockSiteSettingsRepository, skill::MockSkillRepository,
    },
    settings::{AppConfig, AppEnvironment, LogFormat},
    AppState, Repositories,
};

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: "postgres://localhost/portfolio_test".into(),
        cors_allowed_origins: vec!["*".into()],
        jwt_secret: "test-secret-that-is-long-enough-for-hs512".into(),
        jwt_expiration_minutes: 60,
        admin_username: "admin".into(),
        admin_password_hash: None,
        smtp_host: None,
        smtp_port: None,
        smtp_username: None,
        smtp_password: None,
        mail_from: "noreply@localhost".into(),
        notification_timeout_secs: 1,
        contact_rate_limit_per_hour: 5,
        trust_x_forwarded_for: false,
        log_format: LogFormat::Plain,
    }
}

/// Mock repositories; tests set expectations on the fields before building state.
#[derive(Default)]
pub struct MockRepositories {
    pub palettes: MockPaletteRepository,
    pub projects: MockProjectRepository,
    pub skills: MockSkillRepository,
    pub experiences: MockExperienceRepository,
    pub messages: MockContactMessageRepository,
    pub settings: MockSiteSettingsRepository,
}

impl MockRepositories {
    pub fn into_repositories(self) -> Repositories {
        Repositories {
            palettes: Arc::new(self.palettes),
            projects: Arc::new(self.projects),
            skills: Arc::new(self.skills),
            experiences: Arc::new(self.experiences),
            messages: Arc::new(self.messages),
            settings: Arc::new(self.settings),
        }
    }
}

pub fn mock_state_with(mocks: MockRepositories) -> web::Data<AppState> {
    let state = AppState::build(&test_config(), mocks.into_repositories(), Arc::new(MockNotifier::new()))
        .expect("test state");
    web::Data::new(state)
}

pub fn mock_state() -> web::Data<AppState> {
    mock_state_with(MockRepositories::default())
}

pub fn sample_palette(name: &str, active: bool) -> ColorPalette {
    ColorPalette {
        id: Uuid::new_v4(),
        name: name.to_string(),
        primary_color: "#112233".into(),
        secondary_color: "#445566".into(),
        accent_color: "#778899".into(),
        text_color: "#000000".into(),
        background_color: "#ffffff".into(),
        is_active: active,
        created_at: Utc::now(),
    }
}

pub fn sample_project(title: &str, category: ProjectCategory) -> Project {
    Project {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slugify(title),
        description: format!("About **{title}**.\n\nBuilt with care."),
        short_description: format!("{title} in brief"),
        image: None,
        technologies: "Rust, Postgres".into(),
        project_url: None,
        github_url: None,
        category,
        featured: false,
        order: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_skill(name: &str, category: SkillCategory) -> Skill {
    Skill {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        proficiency: 3,
        icon: DEFAULT_ICON.to_string(),
        order: 0,
    }
}

pub fn sample_experience(title: &str) -> Experience {
    Experience {
        id: Uuid::new_v4(),
        title: title.to_string(),
        company: "Acme".into(),
        location: "Remote".into(),
        description: "Built things.".into(),
        start_date: NaiveDate::from_ymd_opt(2021, 1, 4).expect("valid date"),
        end_date: None,
        is_current: true,
        order: 0,
    }
}

pub fn stored_message(message: &NewContactMessage) -> ContactMessage {
    ContactMessage {
        id: Uuid::new_v4(),
        name: message.name.clone(),
        email: message.email.clone(),
        subject: message.subject.clone(),
        message: message.message.clone(),
        created_at: Utc::now(),
        is_read: false,
    }
}
