use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    option_fields::OptionField,
    validation::{
        required, validate_hex_color, validate_not_null, validate_optional_hex_color,
        validate_required_field,
    },
};

pub const DEFAULT_PRIMARY_COLOR: &str = "#007bff";
pub const DEFAULT_SECONDARY_COLOR: &str = "#6c757d";
pub const DEFAULT_ACCENT_COLOR: &str = "#28a745";
pub const DEFAULT_TEXT_COLOR: &str = "#212529";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_PALETTE_NAME: &str = "Default";

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ColorPalette {
    pub id: Uuid,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub text_color: String,
    pub background_color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Colors handed to templates and returned by `/api/palette/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub text_color: String,
    pub background_color: String,
}

impl ThemeColors {
    /// Used whenever no palette is active.
    pub fn fallback() -> Self {
        ThemeColors {
            name: DEFAULT_PALETTE_NAME.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl From<ColorPalette> for ThemeColors {
    fn from(palette: ColorPalette) -> Self {
        ThemeColors {
            name: palette.name,
            primary_color: palette.primary_color,
            secondary_color: palette.secondary_color,
            accent_color: palette.accent_color,
            text_color: palette.text_color,
            background_color: palette.background_color,
        }
    }
}

fn default_primary() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}
fn default_secondary() -> String {
    DEFAULT_SECONDARY_COLOR.to_string()
}
fn default_accent() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}
fn default_text() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}
fn default_background() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPaletteRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "required")
    )]
    pub name: String,

    #[serde(default = "default_primary")]
    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: String,

    #[serde(default = "default_secondary")]
    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: String,

    #[serde(default = "default_accent")]
    #[validate(custom(function = "validate_hex_color"))]
    pub accent_color: String,

    #[serde(default = "default_text")]
    #[validate(custom(function = "validate_hex_color"))]
    pub text_color: String,

    #[serde(default = "default_background")]
    #[validate(custom(function = "validate_hex_color"))]
    pub background_color: String,

    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdatePaletteRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "validate_required_field")
    )]
    pub name: OptionField<String>,

    #[validate(custom(function = "validate_optional_hex_color"))]
    pub primary_color: OptionField<String>,

    #[validate(custom(function = "validate_optional_hex_color"))]
    pub secondary_color: OptionField<String>,

    #[validate(custom(function = "validate_optional_hex_color"))]
    pub accent_color: OptionField<String>,

    #[validate(custom(function = "validate_optional_hex_color"))]
    pub text_color: OptionField<String>,

    #[validate(custom(function = "validate_optional_hex_color"))]
    pub background_color: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub is_active: OptionField<bool>,
}

impl UpdatePaletteRequest {
    /// True when the patch turns the palette on, which must clear every other active flag.
    pub fn activates(&self) -> bool {
        matches!(self.is_active, OptionField::SetToValue(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_palette_defaults_to_stock_colors() {
        let request: NewPaletteRequest = serde_json::from_str(r#"{"name": "Ocean"}"#).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(request.background_color, DEFAULT_BACKGROUND_COLOR);
        assert!(!request.is_active);
    }

    #[test]
    fn new_palette_rejects_bad_hex() {
        let request: NewPaletteRequest =
            serde_json::from_str(r#"{"name": "Broken", "accent_color": "green"}"#).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("accent_color"));
    }

    #[test]
    fn update_rejects_null_color() {
        let request: UpdatePaletteRequest = serde_json::from_str(r#"{"text_color": null}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_reports_activation() {
        let request: UpdatePaletteRequest = serde_json::from_str(r#"{"is_active": true}"#).unwrap();
        assert!(request.activates());

        let request: UpdatePaletteRequest = serde_json::from_str(r#"{"is_active": false}"#).unwrap();
        assert!(!request.activates());
    }

    #[test]
    fn fallback_matches_stock_colors() {
        let theme = ThemeColors::fallback();
        let json = serde_json::to_value(&theme).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Default",
                "primary_color": "#007bff",
                "secondary_color": "#6c757d",
                "accent_color": "#28a745",
                "text_color": "#212529",
                "background_color": "#ffffff"
            })
        );
    }
}
