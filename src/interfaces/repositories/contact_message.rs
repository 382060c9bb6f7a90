use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::contact_message::{ContactMessage, MessageFilter, NewContactMessage},
    errors::AppError,
    repositories::sqlx_repo::{like_pattern, SqlxContactMessageRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage, AppError>;
    async fn get_message(&self, id: &Uuid) -> Result<ContactMessage, AppError>;
    /// Newest first.
    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<ContactMessage>, AppError>;
    async fn set_read(&self, id: &Uuid, is_read: bool) -> Result<ContactMessage, AppError>;
}

impl SqlxContactMessageRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactMessageRepo { pool }
    }
}

#[async_trait]
impl ContactMessageRepository for SqlxContactMessageRepo {
    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage, AppError> {
        let created = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_message(&self, id: &Uuid) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".into()))
    }

    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<ContactMessage>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM contact_messages WHERE TRUE");

        if let Some(is_read) = filter.is_read {
            builder.push(" AND is_read = ").push_bind(is_read);
        }
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = like_pattern(term);
            builder.push(" AND (name ILIKE ").push_bind(pattern.clone());
            builder.push(" OR email ILIKE ").push_bind(pattern.clone());
            builder.push(" OR subject ILIKE ").push_bind(pattern.clone());
            builder.push(" OR message ILIKE ").push_bind(pattern);
            builder.push(")");
        }
        builder.push(" ORDER BY created_at DESC");

        let messages = builder
            .build_query_as::<ContactMessage>()
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    async fn set_read(&self, id: &Uuid, is_read: bool) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET is_read = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_read)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".into()))
    }
}
