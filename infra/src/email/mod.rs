//! Email Service Module
//!
//! This module provides email service implementations for sending one-time
//! codes: an SMTP provider for production and a mock for development.

pub mod email_service;
pub mod mock_email;

// SMTP email service (feature-gated)
#[cfg(feature = "smtp-email")]
pub mod smtp;

pub use email_service::EmailService;
pub use mock_email::MockEmailService;

#[cfg(feature = "smtp-email")]
pub use smtp::SmtpEmailService;

use std::sync::Arc;

use og_shared::EmailSettings;

use crate::InfrastructureError;

/// Subject line of every code email
pub const OTP_EMAIL_SUBJECT: &str = "Your verification code";

/// Create an email service based on configuration
///
/// # Returns
///
/// * `Ok(Some(service))` - A provider for the email channel
/// * `Ok(None)` - No provider is configured; the channel stays unavailable
pub fn create_email_service(
    settings: Option<&EmailSettings>,
    use_mock: bool,
) -> Result<Option<Arc<dyn EmailService>>, InfrastructureError> {
    if use_mock {
        return Ok(Some(Arc::new(MockEmailService::new())));
    }

    match settings {
        #[cfg(feature = "smtp-email")]
        Some(settings) => Ok(Some(Arc::new(SmtpEmailService::new(settings)?))),
        #[cfg(not(feature = "smtp-email"))]
        Some(_) => {
            tracing::warn!("Email credentials are set but the smtp-email feature is disabled");
            Ok(None)
        }
        None => Ok(None),
    }
}
