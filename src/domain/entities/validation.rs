use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateEmail, ValidationError};

use crate::entities::option_fields::OptionField;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid")
});

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", "This field is required."));
    }
    Ok(())
}

pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR.is_match(value) {
        return Err(new_validation_error("invalid_color", "Color must be a hex value like #1a2b3c"));
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

/// Blank slugs pass; they are derived from the title later.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Ok(());
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    Ok(())
}

// ───── PATCH field helpers ──────────────────────────────────────────

/// Non-nullable text column: `null` is rejected, a value must not be blank.
pub fn validate_required_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToNull => Err(new_validation_error("null_not_allowed", "This field cannot be null.")),
        OptionField::SetToValue(v) => required(v),
        OptionField::Unchanged => Ok(()),
    }
}

/// Non-nullable text column that may be blank.
pub fn validate_not_null<T>(value: &OptionField<T>) -> Result<(), ValidationError> {
    if value.is_set_to_null() {
        return Err(new_validation_error("null_not_allowed", "This field cannot be null."));
    }
    Ok(())
}

pub fn validate_optional_hex_color(value: &OptionField<String>) -> Result<(), ValidationError> {
    validate_not_null(value)?;
    if let OptionField::SetToValue(color) = value {
        validate_hex_color(color)?;
    }
    Ok(())
}

pub fn validate_optional_url_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_url(url)?;
    }
    Ok(())
}

pub fn validate_optional_slug(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(slug) = value {
        validate_slug(slug)?;
    }
    Ok(())
}

/// Blank clears the address, anything else must parse as an email.
pub fn validate_optional_email(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(email) if !email.trim().is_empty() && !email.trim().to_string().validate_email() => {
            Err(new_validation_error("invalid_email", "Enter a valid email address."))
        }
        _ => Ok(()),
    }
}
