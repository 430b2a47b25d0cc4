//! Configuration module with concern-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `delivery` - SMS (Twilio) and email (SMTP) provider credentials
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Code width, validity window and attempt budget
//! - `server` - HTTP server binding and CORS origins
//!
//! Every loader has a `from_env` constructor and a `from_lookup` constructor
//! taking a key lookup function, so tests never have to mutate the process
//! environment.

pub mod delivery;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use delivery::{DeliveryConfig, EmailSettings, TwilioSettings};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Delivery provider configuration
    pub delivery: DeliveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            delivery: DeliveryConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup);
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_lookup(&lookup),
            otp: OtpConfig::from_lookup(&lookup),
            delivery: DeliveryConfig::from_lookup(&lookup),
            logging,
        }
    }
}

/// Parse an optional value, falling back to `default` when absent or malformed
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a non-blank value
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
