//! SMS Service Trait

use async_trait::async_trait;

use crate::InfrastructureError;

/// Common interface for SMS providers
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a text message
    ///
    /// # Arguments
    ///
    /// * `phone_number` - Recipient in E.164 format
    /// * `message` - Message body
    ///
    /// # Returns
    ///
    /// The provider's message identifier
    async fn send_sms(&self, phone_number: &str, message: &str)
        -> Result<String, InfrastructureError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
