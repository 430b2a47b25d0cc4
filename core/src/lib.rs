//! # OtpGate Core
//!
//! Core OTP lifecycle for the OtpGate backend.
//! This crate contains the challenge entity, the store contract with its
//! in-memory implementation, the issue/verify service, and the error types
//! returned to the boundary layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
