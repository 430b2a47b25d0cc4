//! Email Service Trait

use async_trait::async_trait;

use crate::InfrastructureError;

/// Common interface for email providers
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Returns
    ///
    /// An identifier for the sent message
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
