//! Delivery provider configuration
//!
//! Both providers are optional. A provider whose credentials are missing is
//! left as `None`, and the delivery layer reports its channel as not
//! configured instead of attempting to send.

use serde::{Deserialize, Serialize};

use super::{non_empty, parse_or};

/// SMTP relay used when `SMTP_HOST` is not set
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Twilio credentials
#[derive(Clone, Deserialize, Serialize)]
pub struct TwilioSettings {
    /// Account SID (`TWILIO_SID`)
    pub account_sid: String,
    /// Auth token (`TWILIO_AUTH`)
    pub auth_token: String,
    /// Sending number in E.164 format (`TWILIO_PHONE`)
    pub from_number: String,
}

/// SMTP credentials
#[derive(Clone, Deserialize, Serialize)]
pub struct EmailSettings {
    /// Relay host (`SMTP_HOST`)
    pub smtp_host: String,
    /// Sender address, also the SMTP user (`EMAIL_FROM`)
    pub from_address: String,
    /// SMTP password (`EMAIL_PASS`)
    pub password: String,
}

// Secrets stay out of Debug output
impl std::fmt::Debug for TwilioSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioSettings")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .finish()
    }
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("from_address", &self.from_address)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Delivery configuration for both channels
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// SMS provider, present only when all Twilio variables are set
    pub twilio: Option<TwilioSettings>,
    /// Email provider, present only when sender and password are set
    pub email: Option<EmailSettings>,
    /// Use console mock providers for both channels (`DELIVERY_MOCK=true`)
    #[serde(default)]
    pub use_mock: bool,
}

impl DeliveryConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let twilio = match (
            non_empty(lookup, "TWILIO_SID"),
            non_empty(lookup, "TWILIO_AUTH"),
            non_empty(lookup, "TWILIO_PHONE"),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioSettings {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => None,
        };

        let email = match (non_empty(lookup, "EMAIL_FROM"), non_empty(lookup, "EMAIL_PASS")) {
            (Some(from_address), Some(password)) => Some(EmailSettings {
                smtp_host: non_empty(lookup, "SMTP_HOST")
                    .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                from_address,
                password,
            }),
            _ => None,
        };

        Self {
            twilio,
            email,
            use_mock: parse_or(lookup, "DELIVERY_MOCK", false),
        }
    }
}
