use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::{
    option_fields::OptionField,
    validation::{new_validation_error, validate_not_null, validate_optional_email, validate_required_field},
};

pub const DEFAULT_SITE_TITLE: &str = "Portfolio";
pub const DEFAULT_SITE_DESCRIPTION: &str = "Portfolio of a Web & Mobile Developer";
pub const DEFAULT_AUTHOR_NAME: &str = "Developer";

/// The single row of site-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SiteSettings {
    pub id: Uuid,
    #[serde(skip)]
    pub singleton: bool,
    pub site_title: String,
    pub site_description: String,
    pub author_name: String,
    pub author_bio: String,
    pub author_image: Option<String>,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Social network name → profile URL.
    pub social_links: Json<Map<String, Value>>,
    pub current_palette_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl SiteSettings {
    /// In-memory defaults, matching the column defaults of a freshly created row.
    pub fn defaults() -> Self {
        SiteSettings {
            id: Uuid::nil(),
            singleton: true,
            site_title: DEFAULT_SITE_TITLE.to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_bio: String::new(),
            author_image: None,
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            social_links: Json(Map::new()),
            current_palette_id: None,
            updated_at: Utc::now(),
        }
    }

    /// Address that receives contact notifications, if one is set.
    pub fn notification_email(&self) -> Option<&str> {
        let email = self.email.trim();
        if email.is_empty() { None } else { Some(email) }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateSettingsRequest {
    #[validate(length(max = 200), custom(function = "validate_required_field"))]
    pub site_title: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub site_description: OptionField<String>,

    #[validate(length(max = 100), custom(function = "validate_required_field"))]
    pub author_name: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub author_bio: OptionField<String>,

    #[validate(length(max = 255))]
    pub author_image: OptionField<String>,

    #[validate(length(max = 254), custom(function = "validate_optional_email"))]
    pub email: OptionField<String>,

    #[validate(length(max = 20))]
    pub phone: OptionField<String>,

    #[validate(length(max = 100))]
    pub location: OptionField<String>,

    #[validate(custom(function = "validate_social_links"))]
    pub social_links: OptionField<Value>,

    pub current_palette_id: OptionField<Uuid>,
}

impl UpdateSettingsRequest {
    /// Blank-able text columns store `""` rather than NULL.
    pub fn blank_for_null(field: &OptionField<String>) -> OptionField<String> {
        match field {
            OptionField::SetToNull => OptionField::SetToValue(String::new()),
            other => other.clone(),
        }
    }

    pub fn social_links_map(&self) -> OptionField<Json<Map<String, Value>>> {
        match &self.social_links {
            OptionField::SetToValue(Value::Object(map)) => OptionField::SetToValue(Json(map.clone())),
            OptionField::SetToNull => OptionField::SetToValue(Json(Map::new())),
            _ => OptionField::Unchanged,
        }
    }
}

fn validate_social_links(value: &OptionField<Value>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(Value::Object(map)) => {
            if map.values().all(Value::is_string) {
                Ok(())
            } else {
                Err(new_validation_error("invalid_social_link", "Social links must map names to URL strings"))
            }
        }
        OptionField::SetToValue(_) => Err(new_validation_error(
            "invalid_social_links",
            "Social links must be a JSON object",
        )),
        _ => Ok(()),
    }
}
