//! Channel routing for the core delivery capability
//!
//! `ChannelDelivery` implements `og_core::DeliveryService` by handing SMS to an
//! [`SmsService`] and email to an [`EmailService`]. Either provider may be
//! absent, in which case its channel reports `ChannelNotConfigured`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use og_core::{Channel, DeliveryError, DeliveryService};
use og_shared::DeliveryConfig;

use crate::email::{create_email_service, EmailService, OTP_EMAIL_SUBJECT};
use crate::sms::{create_sms_service, SmsService};
use crate::InfrastructureError;

/// Delivery capability backed by optional SMS and email providers
#[derive(Clone, Default)]
pub struct ChannelDelivery {
    sms: Option<Arc<dyn SmsService>>,
    email: Option<Arc<dyn EmailService>>,
}

impl ChannelDelivery {
    pub fn new(sms: Option<Arc<dyn SmsService>>, email: Option<Arc<dyn EmailService>>) -> Self {
        Self { sms, email }
    }

    /// Build the providers described by `config`
    pub fn from_config(config: &DeliveryConfig) -> Result<Self, InfrastructureError> {
        let sms = create_sms_service(config.twilio.as_ref(), config.use_mock)?;
        let email = create_email_service(config.email.as_ref(), config.use_mock)?;

        info!(
            sms_provider = sms.as_ref().map(|s| s.provider_name()).unwrap_or("none"),
            email_provider = email.as_ref().map(|e| e.provider_name()).unwrap_or("none"),
            "Delivery providers configured"
        );

        Ok(Self::new(sms, email))
    }
}

#[async_trait]
impl DeliveryService for ChannelDelivery {
    async fn send(
        &self,
        channel: Channel,
        recipient: &str,
        message: &str,
    ) -> Result<String, DeliveryError> {
        let result = match channel {
            Channel::Sms => match &self.sms {
                Some(sms) => sms.send_sms(recipient, message).await,
                None => return Err(DeliveryError::ChannelNotConfigured { channel }),
            },
            Channel::Email => match &self.email {
                Some(email) => email.send_email(recipient, OTP_EMAIL_SUBJECT, message).await,
                None => return Err(DeliveryError::ChannelNotConfigured { channel }),
            },
        };

        result.map_err(|e| DeliveryError::Failed {
            message: e.to_string(),
        })
    }

    fn is_channel_configured(&self, channel: Channel) -> bool {
        match channel {
            Channel::Sms => self.sms.is_some(),
            Channel::Email => self.email.is_some(),
        }
    }
}
