//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

use super::parse_or;

/// Default number of decimal digits in a generated code
pub const DEFAULT_DIGIT_WIDTH: usize = 5;

/// Smallest accepted code width
pub const MIN_DIGIT_WIDTH: usize = 4;

/// Largest accepted code width
pub const MAX_DIGIT_WIDTH: usize = 9;

/// Default validity window of a challenge (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default number of verification attempts before lockout
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default period of the background expiry sweep
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Configuration of code generation, expiry and attempt limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Length of generated codes, clamped to 4..=9
    pub digit_width: usize,

    /// Validity window in milliseconds
    pub ttl_ms: u64,

    /// Verification attempts allowed per challenge (at least 1)
    pub max_attempts: u32,

    /// Period of the expiry sweeper in seconds, 0 disables it
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            digit_width: DEFAULT_DIGIT_WIDTH,
            ttl_ms: DEFAULT_TTL_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl OtpConfig {
    /// Load from `OTP_DIGIT_WIDTH`, `OTP_TTL_MS`, `OTP_MAX_ATTEMPTS`, `OTP_SWEEP_INTERVAL_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            digit_width: parse_or(lookup, "OTP_DIGIT_WIDTH", DEFAULT_DIGIT_WIDTH),
            ttl_ms: parse_or(lookup, "OTP_TTL_MS", DEFAULT_TTL_MS),
            max_attempts: parse_or(lookup, "OTP_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            sweep_interval_secs: parse_or(
                lookup,
                "OTP_SWEEP_INTERVAL_SECS",
                DEFAULT_SWEEP_INTERVAL_SECS,
            ),
        }
        .normalized()
    }

    /// Set the code width
    pub fn with_digit_width(mut self, width: usize) -> Self {
        self.digit_width = width;
        self.normalized()
    }

    /// Set the validity window in milliseconds
    pub fn with_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Set the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self.normalized()
    }

    /// Clamp values into their supported ranges
    pub fn normalized(mut self) -> Self {
        self.digit_width = self.digit_width.clamp(MIN_DIGIT_WIDTH, MAX_DIGIT_WIDTH);
        self.max_attempts = self.max_attempts.max(1);
        self
    }
}
