use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::{
    option_fields::OptionField,
    validation::{new_validation_error, required, validate_not_null, validate_required_field},
};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub order: i32,
}

impl Experience {
    /// e.g. "Jan 2021 - Present" or "Mar 2018 - Dec 2020".
    pub fn period(&self) -> String {
        let start = self.start_date.format("%b %Y");
        match (self.is_current, self.end_date) {
            (true, _) | (false, None) => format!("{} - Present", start),
            (false, Some(end)) => format!("{} - {}", start, end.format("%b %Y")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceView {
    #[serde(flatten)]
    pub experience: Experience,
    pub period: String,
}

impl From<Experience> for ExperienceView {
    fn from(experience: Experience) -> Self {
        ExperienceView {
            period: experience.period(),
            experience,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_date_range"))]
pub struct NewExperienceRequest {
    #[validate(length(max = 200), custom(function = "required"))]
    pub title: String,

    #[validate(length(max = 200), custom(function = "required"))]
    pub company: String,

    #[validate(length(max = 100), custom(function = "required"))]
    pub location: String,

    #[validate(custom(function = "required"))]
    pub description: String,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_current: bool,

    #[serde(default)]
    pub order: i32,
}

fn validate_date_range(request: &NewExperienceRequest) -> Result<(), ValidationError> {
    match request.end_date {
        Some(end) if end < request.start_date => Err(new_validation_error(
            "end_before_start",
            "End date cannot be before the start date",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateExperienceRequest {
    #[validate(length(max = 200), custom(function = "validate_required_field"))]
    pub title: OptionField<String>,

    #[validate(length(max = 200), custom(function = "validate_required_field"))]
    pub company: OptionField<String>,

    #[validate(length(max = 100), custom(function = "validate_required_field"))]
    pub location: OptionField<String>,

    #[validate(custom(function = "validate_required_field"))]
    pub description: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub start_date: OptionField<NaiveDate>,

    pub end_date: OptionField<NaiveDate>,

    #[validate(custom(function = "validate_not_null"))]
    pub is_current: OptionField<bool>,

    #[validate(custom(function = "validate_not_null"))]
    pub order: OptionField<i32>,
}
