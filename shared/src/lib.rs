//! Shared configuration and utilities for the OtpGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - Recipient utilities (phone/email validation, log masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DeliveryConfig, EmailSettings, Environment, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig, TwilioSettings,
};
pub use utils::recipient;
