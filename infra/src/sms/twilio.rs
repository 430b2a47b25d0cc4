//! Twilio SMS Service Implementation
//!
//! This module provides SMS sending capabilities using the Twilio API.
//! A failed send is reported once and never retried; the caller decides
//! whether to issue a new code.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use tracing::{debug, error, info};
use twilio::{Client, OutboundMessage};

use og_shared::recipient::mask_recipient;
use og_shared::TwilioSettings;

use crate::{sms::sms_service::SmsService, InfrastructureError};

/// Twilio rejects bodies longer than this
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    from_number: String,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(settings: &TwilioSettings) -> Result<Self, InfrastructureError> {
        if !settings.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_PHONE must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = Client::new(&settings.account_sid, &settings.auth_token);

        info!(
            from = %mask_recipient(&settings.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self {
            client,
            from_number: settings.from_number.clone(),
        })
    }

    /// Validate and normalize a phone number to E.164 format
    fn normalize_phone_number(phone: &str) -> Result<String, InfrastructureError> {
        if !phone.starts_with('+') {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +14155552671)".to_string(),
            ));
        }

        match phone.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                debug!(recipient = %mask_recipient(&formatted), "Validated phone number");
                Ok(formatted)
            }
            Err(e) => Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let normalized_phone = Self::normalize_phone_number(phone_number)?;

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        debug!(
            recipient = %mask_recipient(&normalized_phone),
            length = message.len(),
            "Sending SMS via Twilio"
        );

        let outbound = OutboundMessage::new(&self.from_number, &normalized_phone, message);
        match self.client.send_message(outbound).await {
            Ok(response) => {
                info!(
                    recipient = %mask_recipient(&normalized_phone),
                    sid = %response.sid,
                    "SMS sent via Twilio"
                );
                Ok(response.sid)
            }
            Err(e) => {
                error!(
                    recipient = %mask_recipient(&normalized_phone),
                    error = %e,
                    "Twilio rejected SMS"
                );
                Err(InfrastructureError::Sms(format!("Failed to send SMS: {}", e)))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
