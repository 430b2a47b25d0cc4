//! Traits for the collaborators of the OTP service

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::Channel;
use crate::errors::DeliveryError;

/// Capability that transmits a rendered message to a recipient
#[async_trait]
pub trait DeliveryService: Send + Sync {
    /// Send `message` to `recipient` over `channel`
    ///
    /// # Returns
    /// * `Ok(message_id)` - Provider identifier of the sent message
    /// * `Err(DeliveryError::ChannelNotConfigured)` - No provider for this channel
    /// * `Err(DeliveryError::Failed)` - The provider rejected or failed the send
    async fn send(
        &self,
        channel: Channel,
        recipient: &str,
        message: &str,
    ) -> Result<String, DeliveryError>;

    /// Whether a provider is configured for `channel`
    fn is_channel_configured(&self, _channel: Channel) -> bool {
        true
    }
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a decimal code of exactly `width` characters
    fn generate(&self, width: usize) -> String;
}
