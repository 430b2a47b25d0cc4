//! Configuration for the OTP service

use chrono::Duration;
use og_shared::config::otp::{
    OtpConfig, DEFAULT_DIGIT_WIDTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_TTL_MS, MAX_DIGIT_WIDTH,
    MIN_DIGIT_WIDTH,
};

/// Configuration for the OTP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpServiceConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Validity window of a challenge
    pub ttl: Duration,
    /// Verification attempts allowed per challenge
    pub max_attempts: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_DIGIT_WIDTH,
            ttl: Duration::milliseconds(DEFAULT_TTL_MS as i64),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpServiceConfig {
    /// Clamp the code length to 4..=9 digits and allow at least one attempt
    pub fn normalized(mut self) -> Self {
        self.code_length = self.code_length.clamp(MIN_DIGIT_WIDTH, MAX_DIGIT_WIDTH);
        self.max_attempts = self.max_attempts.max(1);
        self
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.digit_width,
            ttl: Duration::milliseconds(i64::try_from(config.ttl_ms).unwrap_or(i64::MAX)),
            max_attempts: config.max_attempts,
        }
        .normalized()
    }
}
