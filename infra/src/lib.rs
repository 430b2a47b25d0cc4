//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OtpGate server.
//! It provides the concrete delivery providers behind the core
//! `DeliveryService` capability and the background expiry sweeper.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **SMS**: SMS provider integrations (Twilio, console mock)
//! - **Email**: Email provider integrations (SMTP via lettre, console mock)
//! - **Delivery**: Channel routing from the core capability to the providers
//! - **Sweeper**: Periodic eviction of expired challenges
//!
//! ## Features
//!
//! - `twilio-sms`: Enable Twilio SMS service (default)
//! - `smtp-email`: Enable SMTP email service (default)

/// SMS service module - External SMS providers
pub mod sms;

/// Email service module - External email providers
pub mod email;

/// Channel routing for the core delivery capability
pub mod delivery;

/// Background eviction of expired challenges
pub mod sweeper;

pub use delivery::ChannelDelivery;
pub use sweeper::spawn_expiry_sweeper;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),
}
