//! Error types returned by the OTP lifecycle.
//!
//! Every failure is an expected, caller-recoverable outcome. The boundary
//! layer maps them to user-facing responses through [`OtpError::error_code`].

use thiserror::Error;

use crate::domain::entities::Channel;

/// Failures of `issue` and `verify`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Delivery channel '{channel}' is not configured")]
    DeliveryUnavailable { channel: Channel },

    #[error("Delivery failed: {message}")]
    DeliveryFailed { message: String },

    #[error("No active challenge for this recipient")]
    NoActiveChallenge,

    #[error("Challenge has expired. Please request a new code")]
    Expired,

    #[error("Maximum attempts exceeded. Please request a new code")]
    TooManyAttempts,

    #[error("Invalid code. {attempts_remaining} attempt(s) remaining")]
    InvalidCode { attempts_remaining: u32 },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OtpError {
    /// Stable machine-readable code for the boundary layer
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::InvalidRequest { .. } => "invalid_request",
            OtpError::DeliveryUnavailable { channel: Channel::Sms } => "sms_not_configured",
            OtpError::DeliveryUnavailable { channel: Channel::Email } => "email_not_configured",
            OtpError::DeliveryFailed { .. } => "delivery_failed",
            OtpError::NoActiveChallenge => "no_active_otp",
            OtpError::Expired => "otp_expired",
            OtpError::TooManyAttempts => "too_many_attempts",
            OtpError::InvalidCode { .. } => "invalid_otp",
            OtpError::Internal { .. } => "server_error",
        }
    }

    /// Whether this outcome removed the challenge, so the caller must re-issue
    pub fn consumes_challenge(&self) -> bool {
        matches!(self, OtpError::Expired | OtpError::TooManyAttempts)
    }
}

/// Failures reported by a delivery provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Channel '{channel}' has no configured provider")]
    ChannelNotConfigured { channel: Channel },

    #[error("{message}")]
    Failed { message: String },
}

impl From<DeliveryError> for OtpError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::ChannelNotConfigured { channel } => {
                OtpError::DeliveryUnavailable { channel }
            }
            DeliveryError::Failed { message } => OtpError::DeliveryFailed { message },
        }
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            OtpError::DeliveryUnavailable { channel: Channel::Sms }.error_code(),
            "sms_not_configured"
        );
        assert_eq!(OtpError::NoActiveChallenge.error_code(), "no_active_otp");
        assert_eq!(
            OtpError::InvalidCode { attempts_remaining: 2 }.error_code(),
            "invalid_otp"
        );
    }

    #[test]
    fn test_delivery_error_conversion() {
        let err: OtpError = DeliveryError::ChannelNotConfigured { channel: Channel::Email }.into();
        assert_eq!(err, OtpError::DeliveryUnavailable { channel: Channel::Email });

        let err: OtpError = DeliveryError::Failed { message: "timeout".to_string() }.into();
        assert_eq!(err, OtpError::DeliveryFailed { message: "timeout".to_string() });
    }

    #[test]
    fn test_consuming_errors() {
        assert!(OtpError::Expired.consumes_challenge());
        assert!(OtpError::TooManyAttempts.consumes_challenge());
        assert!(!OtpError::InvalidCode { attempts_remaining: 1 }.consumes_challenge());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            OtpError::InvalidCode { attempts_remaining: 3 }.to_string(),
            "Invalid code. 3 attempt(s) remaining"
        );
        assert_eq!(
            OtpError::DeliveryUnavailable { channel: Channel::Sms }.to_string(),
            "Delivery channel 'sms' is not configured"
        );
    }
}
