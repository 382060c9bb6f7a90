pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::settings::AppConfig;

/// Outgoing notification channel for new contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Used when no SMTP host is configured; every notification is dropped.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, to: &str, _subject: &str, _body: &str) -> Result<(), String> {
        tracing::debug!(recipient = %to, "SMTP disabled, skipping notification");
        Ok(())
    }
}

/// Picks the SMTP notifier when a host is configured, otherwise the disabled one.
pub fn notifier_from_config(config: &AppConfig) -> Arc<dyn Notifier> {
    if !config.smtp_enabled() {
        tracing::info!("SMTP host not configured, contact notifications disabled");
        return Arc::new(DisabledNotifier);
    }

    match smtp::SmtpNotifier::from_config(config) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            tracing::error!("Invalid SMTP configuration, contact notifications disabled: {}", e);
            Arc::new(DisabledNotifier)
        }
    }
}
