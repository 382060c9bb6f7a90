use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::entities::{
    option_fields::OptionField,
    validation::{
        new_validation_error, required, validate_not_null, validate_optional_slug,
        validate_optional_url_field, validate_required_field, validate_slug, validate_url,
    },
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 200;
const MAX_SLUG_LENGTH: u64 = 200;
const MAX_SHORT_DESCRIPTION_LENGTH: u64 = 300;
const MAX_TECHNOLOGIES_LENGTH: u64 = 500;
const MAX_IMAGE_LENGTH: u64 = 255;

/// Query-string token meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    #[default]
    Web,
    Mobile,
    Fullstack,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [
        ProjectCategory::Web,
        ProjectCategory::Mobile,
        ProjectCategory::Fullstack,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Fullstack => "fullstack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "Web Development",
            ProjectCategory::Mobile => "Mobile Development",
            ProjectCategory::Fullstack => "Full Stack",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// Category filter requested by a visitor on the project listing.
#[derive(Debug, Clone, PartialEq)]
pub enum CategorySelection {
    All,
    Category(ProjectCategory),
    /// A token that is not a known code; matches nothing but is echoed back.
    Unmatched(String),
}

impl CategorySelection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategorySelection::All,
            Some(ALL_CATEGORIES) => CategorySelection::All,
            Some(token) => ProjectCategory::from_code(token)
                .map(CategorySelection::Category)
                .unwrap_or_else(|| CategorySelection::Unmatched(token.to_string())),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES,
            CategorySelection::Category(category) => category.code(),
            CategorySelection::Unmatched(token) => token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub code: &'static str,
    pub label: &'static str,
}

pub fn category_options() -> Vec<CategoryOption> {
    ProjectCategory::ALL
        .iter()
        .map(|c| CategoryOption { code: c.code(), label: c.label() })
        .collect()
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub image: Option<String>,
    pub technologies: String,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn technologies_list(&self) -> Vec<String> {
        parse_technologies(&self.technologies)
    }
}

/// Splits the stored comma-separated list, trimming entries and dropping blanks.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub image: Option<String>,
    pub technologies: String,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub category: Option<ProjectCategory>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

// ───── API / Template Models ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub category_display: &'static str,
    pub technologies_list: Vec<String>,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        ProjectView {
            category_display: project.category.label(),
            technologies_list: project.technologies_list(),
            project,
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(
        length(max = MAX_TITLE_LENGTH, message = "Title must be at most 200 characters"),
        custom(function = "required")
    )]
    pub title: String,

    #[validate(
        length(max = MAX_SLUG_LENGTH, message = "Slug must be at most 200 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,

    #[validate(custom(function = "required"))]
    pub description: String,

    #[validate(
        length(max = MAX_SHORT_DESCRIPTION_LENGTH, message = "Short description must be at most 300 characters"),
        custom(function = "required")
    )]
    pub short_description: String,

    #[validate(length(max = MAX_IMAGE_LENGTH))]
    pub image: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_TECHNOLOGIES_LENGTH, message = "Technologies must be at most 500 characters"))]
    pub technologies: String,

    #[validate(custom(function = "validate_url"))]
    pub project_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[serde(default)]
    pub category: ProjectCategory,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(
        length(max = MAX_TITLE_LENGTH, message = "Title must be at most 200 characters"),
        custom(function = "validate_required_field")
    )]
    pub title: OptionField<String>,

    #[validate(
        length(max = MAX_SLUG_LENGTH, message = "Slug must be at most 200 characters"),
        custom(function = "validate_optional_slug")
    )]
    pub slug: OptionField<String>,

    #[validate(custom(function = "validate_required_field"))]
    pub description: OptionField<String>,

    #[validate(
        length(max = MAX_SHORT_DESCRIPTION_LENGTH, message = "Short description must be at most 300 characters"),
        custom(function = "validate_required_field")
    )]
    pub short_description: OptionField<String>,

    #[validate(length(max = MAX_IMAGE_LENGTH))]
    pub image: OptionField<String>,

    #[validate(
        length(max = MAX_TECHNOLOGIES_LENGTH, message = "Technologies must be at most 500 characters"),
        custom(function = "validate_not_null")
    )]
    pub technologies: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub project_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub github_url: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub category: OptionField<ProjectCategory>,

    #[validate(custom(function = "validate_not_null"))]
    pub featured: OptionField<bool>,

    #[validate(custom(function = "validate_not_null"))]
    pub order: OptionField<i32>,
}

// ───── Conversions ──────────────────────────────────────────────────

/// Slugifies `title`, cut back to the last hyphen that fits the slug column.
pub fn slug_from_title(title: &str) -> String {
    let slug = slug::slugify(title);
    let max = MAX_SLUG_LENGTH as usize;
    if slug.len() <= max {
        return slug;
    }

    let head = &slug[..max];
    match head.rfind('-') {
        Some(cut) if cut > 0 => head[..cut].to_string(),
        _ => head.trim_end_matches('-').to_string(),
    }
}

/// Derives a slug from the title when none (or a blank one) was supplied.
pub fn resolve_slug(slug: Option<&str>, title: &str) -> Result<String, ValidationErrors> {
    let candidate = match slug.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slug_from_title(title),
    };

    if candidate.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "slug",
            new_validation_error("slug_empty", "Slug could not be derived from the title; please provide one"),
        );
        return Err(errors);
    }

    Ok(candidate)
}

/// Slug for a PATCH: an explicit non-blank slug wins, otherwise a new title
/// regenerates it, otherwise the current slug is kept.
pub fn resolve_slug_for_update(
    slug_field: &OptionField<String>,
    title_field: &OptionField<String>,
    current_slug: &str,
) -> String {
    match (slug_field, title_field) {
        (OptionField::SetToValue(s), _) if !s.trim().is_empty() => s.trim().to_string(),
        (_, OptionField::SetToValue(new_title)) => {
            let generated = slug_from_title(new_title);
            if generated.is_empty() {
                current_slug.to_string()
            } else {
                generated
            }
        }
        _ => current_slug.to_string(),
    }
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let title = value.title.trim().to_string();
        let slug = resolve_slug(value.slug.as_deref(), &title)?;

        Ok(ProjectInsert {
            title,
            slug,
            description: value.description,
            short_description: value.short_description.trim().to_string(),
            image: value.image.filter(|s| !s.trim().is_empty()),
            technologies: value.technologies.trim().to_string(),
            project_url: value.project_url,
            github_url: value.github_url,
            category: value.category,
            featured: value.featured,
            order: value.order,
        })
    }
}
