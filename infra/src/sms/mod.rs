//! SMS Service Module
//!
//! This module provides SMS service implementations for sending one-time
//! codes. It includes a Twilio provider for production and a mock
//! implementation for development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Security**: Phone number masking in logs

pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::TwilioSmsService;

use std::sync::Arc;

use og_shared::TwilioSettings;

use crate::InfrastructureError;

/// Create an SMS service based on configuration
///
/// # Arguments
///
/// * `settings` - Twilio credentials, if configured
/// * `use_mock` - Use the console mock instead of a real provider
///
/// # Returns
///
/// * `Ok(Some(service))` - A provider for the SMS channel
/// * `Ok(None)` - No provider is configured; the channel stays unavailable
pub fn create_sms_service(
    settings: Option<&TwilioSettings>,
    use_mock: bool,
) -> Result<Option<Arc<dyn SmsService>>, InfrastructureError> {
    if use_mock {
        return Ok(Some(Arc::new(MockSmsService::new())));
    }

    match settings {
        #[cfg(feature = "twilio-sms")]
        Some(settings) => Ok(Some(Arc::new(TwilioSmsService::new(settings)?))),
        #[cfg(not(feature = "twilio-sms"))]
        Some(_) => {
            tracing::warn!("Twilio credentials are set but the twilio-sms feature is disabled");
            Ok(None)
        }
        None => Ok(None),
    }
}
