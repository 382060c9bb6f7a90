use std::{collections::BTreeMap, sync::Arc, time::Duration};

use uuid::Uuid;

use crate::{
    entities::contact_message::{
        form_errors, ContactForm, ContactMessage, MessageFilter, NewContactMessage, UpdateMessageRequest,
    },
    errors::AppError,
    mail::Notifier,
    repositories::{contact_message::ContactMessageRepository, site_settings::SiteSettingsRepository},
};

/// Result of a visitor submitting the contact form.
#[derive(Debug)]
pub enum ContactOutcome {
    Accepted(ContactMessage),
    /// Field name → first error message, for re-rendering the form.
    Rejected(BTreeMap<String, String>),
}

pub struct ContactHandler {
    pub contact_repo: Arc<dyn ContactMessageRepository>,
    pub settings_repo: Arc<dyn SiteSettingsRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub notification_timeout: Duration,
}

impl ContactHandler {
    pub fn new(
        contact_repo: Arc<dyn ContactMessageRepository>,
        settings_repo: Arc<dyn SiteSettingsRepository>,
        notifier: Arc<dyn Notifier>,
        notification_timeout: Duration,
    ) -> Self {
        ContactHandler {
            contact_repo,
            settings_repo,
            notifier,
            notification_timeout,
        }
    }

    /// Validates, persists, then notifies the site owner. Notification
    /// problems are logged and never change the outcome.
    pub async fn submit(&self, form: ContactForm) -> Result<ContactOutcome, AppError> {
        let new_message = match form.into_new_message() {
            Ok(message) => message,
            Err(errors) => return Ok(ContactOutcome::Rejected(form_errors(&errors))),
        };

        let saved = self.contact_repo.create_message(&new_message).await?;
        tracing::info!(message_id = %saved.id, "Contact message stored");

        self.notify_owner(&new_message).await;

        Ok(ContactOutcome::Accepted(saved))
    }

    async fn notify_owner(&self, message: &NewContactMessage) {
        let settings = match self.settings_repo.get_or_create().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Skipping contact notification, settings unavailable: {}", e);
                return;
            }
        };

        let Some(recipient) = settings.notification_email() else {
            tracing::debug!("No site email configured, skipping contact notification");
            return;
        };

        let subject = message.notification_subject();
        let body = message.notification_body();
        let send = self.notifier.notify(recipient, &subject, &body);

        match tokio::time::timeout(self.notification_timeout, send).await {
            Ok(Ok(())) => tracing::info!(%recipient, "Contact notification sent"),
            Ok(Err(e)) => tracing::warn!(%recipient, "Contact notification failed: {}", e),
            Err(_) => tracing::warn!(
                %recipient,
                timeout_secs = self.notification_timeout.as_secs(),
                "Contact notification timed out"
            ),
        }
    }

    pub async fn list(&self, filter: &MessageFilter) -> Result<Vec<ContactMessage>, AppError> {
        self.contact_repo.list_messages(filter).await
    }

    pub async fn get(&self, id: &Uuid) -> Result<ContactMessage, AppError> {
        self.contact_repo.get_message(id).await
    }

    pub async fn mark(&self, id: &Uuid, request: UpdateMessageRequest) -> Result<ContactMessage, AppError> {
        self.contact_repo.set_read(id, request.is_read).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::site_settings::SiteSettings;
    use crate::mail::MockNotifier;
    use crate::repositories::{
        contact_message::MockContactMessageRepository, site_settings::MockSiteSettingsRepository,
    };
    use crate::test_support::stored_message;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "  USER@Example.COM ".into(),
            subject: "Project".into(),
            message: "I would like to work with you.".into(),
        }
    }

    fn settings_with_email(email: &'static str) -> MockSiteSettingsRepository {
        let mut repo = MockSiteSettingsRepository::new();
        repo.expect_get_or_create().returning(move || {
            let mut settings = SiteSettings::defaults();
            settings.email = email.to_string();
            Ok(settings)
        });
        repo
    }

    fn storing_repo() -> MockContactMessageRepository {
        let mut repo = MockContactMessageRepository::new();
        repo.expect_create_message()
            .withf(|m| m.email == "user@example.com")
            .times(1)
            .returning(|m| Ok(stored_message(m)));
        repo
    }

    fn handler(
        repo: MockContactMessageRepository,
        settings: MockSiteSettingsRepository,
        notifier: MockNotifier,
    ) -> ContactHandler {
        ContactHandler::new(Arc::new(repo), Arc::new(settings), Arc::new(notifier), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn valid_submission_is_stored_and_notified() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|to, subject, body| {
                to.to_string() == "owner@example.com"
                    && subject.to_string() == "New message: Project"
                    && body.starts_with("From: Ada")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let outcome = handler(storing_repo(), settings_with_email("owner@example.com"), notifier)
            .submit(valid_form())
            .await
            .unwrap();

        assert!(matches!(outcome, ContactOutcome::Accepted(m) if m.email == "user@example.com"));
    }

    #[tokio::test]
    async fn notification_failure_is_swallowed() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .returning(|_, _, _| Err("connection refused".into()));

        let outcome = handler(storing_repo(), settings_with_email("owner@example.com"), notifier)
            .submit(valid_form())
            .await
            .unwrap();

        assert!(matches!(outcome, ContactOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn no_site_email_means_no_notification() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let outcome = handler(storing_repo(), settings_with_email(""), notifier)
            .submit(valid_form())
            .await
            .unwrap();

        assert!(matches!(outcome, ContactOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_without_persisting() {
        let mut repo = MockContactMessageRepository::new();
        repo.expect_create_message().never();

        let mut form = valid_form();
        form.message = "short".into();

        let outcome = handler(repo, MockSiteSettingsRepository::new(), MockNotifier::new())
            .submit(form)
            .await
            .unwrap();

        match outcome {
            ContactOutcome::Rejected(errors) => assert!(errors.contains_key("message")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
