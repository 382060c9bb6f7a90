use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{entities::option_fields::OptionField, errors::AppError};

#[derive(Clone)]
pub struct SqlxPaletteRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxExperienceRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxContactMessageRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSiteSettingsRepo {
    pub pool: PgPool,
}

/// Appends `, column = <value|NULL>` for a touched PATCH field.
/// Expects the builder to already hold `UPDATE ... SET <something>`.
pub(crate) fn push_patch<'args, T>(
    builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    field: &OptionField<T>,
) where
    T: 'args + Clone + Send + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres>,
{
    match field {
        OptionField::Unchanged => {}
        OptionField::SetToNull => {
            builder.push(format!(", {column} = NULL"));
        }
        OptionField::SetToValue(value) => {
            builder.push(format!(", {column} = "));
            builder.push_bind(value.clone());
        }
    }
}

/// `%term%` for ILIKE, with LIKE wildcards in the user input escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Maps a unique-constraint violation on `constraint` to a conflict with `message`.
pub(crate) fn map_unique_violation(err: sqlx::Error, constraint: &str, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some(constraint) {
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::from(err)
}
