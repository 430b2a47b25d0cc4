//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, CodeGenerator, DeliveryService, IssuedChallenge, OtpService, OtpServiceConfig,
    RecipientLocks, SecureCodeGenerator, SystemClock, Verified,
};
