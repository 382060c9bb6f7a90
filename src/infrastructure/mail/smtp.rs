use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::mail::Notifier;
use crate::settings::AppConfig;

const DEFAULT_SMTP_PORT: u16 = 587;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpNotifier {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpNotifier {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        SmtpNotifier {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    /// STARTTLS relay with credentials when a username is set, plain
    /// connection otherwise (Mailpit, MailHog and similar).
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let host = config
            .smtp_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| "SMTP host is not set".to_string())?;
        let port = config.smtp_port.unwrap_or(DEFAULT_SMTP_PORT);

        let transport = match config.smtp_username.as_deref().filter(|u| !u.is_empty()) {
            Some(username) => {
                let creds = Credentials::new(
                    username.to_string(),
                    config.smtp_password.clone().unwrap_or_default(),
                );
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| e.to_string())?
                    .port(port)
                    .credentials(creds)
                    .build()
            }
            None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .port(port)
                .build(),
        };

        tracing::info!(host, port, "SMTP notifications enabled");
        Ok(Self::new_with_mailer(Box::new(transport), &config.mail_from))
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message, String> {
        Message::builder()
            .from(self.from_email.parse().map_err(|e| format!("Invalid from address: {:?}", e))?)
            .to(to.parse().map_err(|e| format!("Invalid recipient address: {:?}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let email = self.build_message(to, subject, body)?;
        self.mailer.send(email).await
    }
}
