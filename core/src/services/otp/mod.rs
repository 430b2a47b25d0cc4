//! OTP lifecycle service
//!
//! This module provides the complete one-time passcode workflow:
//! - Code generation over a configurable digit width
//! - Challenge storage with expiry, one per recipient
//! - Attempt-limited, single-use verification
//! - Delivery through an injected SMS/email capability

mod clock;
mod config;
mod generator;
mod locks;
mod service;
mod traits;
mod types;


pub use clock::{MockClock, SystemClock};
pub use config::OtpServiceConfig;
pub use generator::{FixedCodeGenerator, SecureCodeGenerator};
pub use locks::{RecipientGuard, RecipientLocks};
pub use service::OtpService;
pub use traits::{Clock, CodeGenerator, DeliveryService};
pub use types::{IssuedChallenge, Verified};
