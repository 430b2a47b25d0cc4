//! SMTP Email Service Implementation
//!
//! Sends plain-text mail through an authenticated SMTP relay using lettre's
//! tokio transport. The sender address doubles as the SMTP user name.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};
use uuid::Uuid;

use og_shared::recipient::mask_recipient;
use og_shared::EmailSettings;

use crate::{email::email_service::EmailService, InfrastructureError};

/// SMTP email service
pub struct SmtpEmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    smtp_host: String,
}

impl SmtpEmailService {
    /// Build a relay transport for `settings`
    ///
    /// No connection is opened here; the first send connects.
    pub fn new(settings: &EmailSettings) -> Result<Self, InfrastructureError> {
        let from: Mailbox = settings.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("EMAIL_FROM is not a valid address: {}", e))
        })?;

        let credentials =
            Credentials::new(settings.from_address.clone(), settings.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .map_err(|e| {
                InfrastructureError::Config(format!(
                    "Invalid SMTP relay '{}': {}",
                    settings.smtp_host, e
                ))
            })?
            .credentials(credentials)
            .build();

        info!(
            smtp_host = %settings.smtp_host,
            from = %mask_recipient(&settings.from_address),
            "SMTP email service initialized"
        );

        Ok(Self {
            mailer,
            from,
            smtp_host: settings.smtp_host.clone(),
        })
    }

    fn build_message(
        &self,
        message_id: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, InfrastructureError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .message_id(Some(format!("<{}@{}>", message_id, self.from.email.domain())))
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let message_id = Uuid::new_v4().to_string();
        let email = self.build_message(&message_id, to, subject, body)?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!(
                    recipient = %mask_recipient(to),
                    message_id = %message_id,
                    smtp_host = %self.smtp_host,
                    "Email sent via SMTP"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    recipient = %mask_recipient(to),
                    smtp_host = %self.smtp_host,
                    error = %e,
                    "SMTP relay rejected email"
                );
                Err(InfrastructureError::Email(format!("Failed to send email: {}", e)))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
