use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::entities::validation::{new_validation_error, required};

pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Raw contact form as posted by a visitor. Missing fields deserialize as
/// empty strings so validation can report them individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters."),
        custom(function = "required")
    )]
    pub name: String,

    #[validate(custom(function = "validate_contact_email"))]
    pub email: String,

    #[validate(
        length(max = 200, message = "Subject must be at most 200 characters."),
        custom(function = "required")
    )]
    pub subject: String,

    #[validate(custom(function = "validate_message_body"))]
    pub message: String,
}

impl ContactForm {
    /// Trims every field and lower-cases the email.
    pub fn normalized(self) -> Self {
        ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Normalizes then validates, yielding the record to persist.
    pub fn into_new_message(self) -> Result<NewContactMessage, ValidationErrors> {
        let form = self.normalized();
        form.validate()?;

        Ok(NewContactMessage {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
        })
    }
}

fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    required(email)?;
    if !email.to_string().validate_email() {
        return Err(new_validation_error("invalid_email", "Enter a valid email address."));
    }
    Ok(())
}

fn validate_message_body(message: &str) -> Result<(), ValidationError> {
    required(message)?;
    if message.trim().chars().count() < MIN_MESSAGE_LENGTH {
        return Err(new_validation_error(
            "message_too_short",
            "Message must be at least 10 characters long.",
        ));
    }
    Ok(())
}

/// First message per field, keyed by field name, for re-rendering the form.
pub fn form_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value.".to_string());
                (field.to_string(), message)
            }),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn notification_subject(&self) -> String {
        format!("New message: {}", self.subject)
    }

    pub fn notification_body(&self) -> String {
        format!("From: {} ({})\n\n{}", self.name, self.email, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub is_read: Option<bool>,
    pub search: Option<String>,
}

/// Messages are read-only apart from the read flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMessageRequest {
    pub is_read: bool,
}
