//! # OtpGate API
//!
//! HTTP boundary for the OTP lifecycle: JSON endpoints to send and verify
//! one-time codes, plus a health probe.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, AppState};
