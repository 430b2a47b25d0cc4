//! One-time passcode route handlers
//!
//! - `POST /send-otp`: issue a code over SMS or email
//! - `POST /verify-otp`: check a submitted code

pub mod send_otp;
pub mod verify_otp;

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Trimmed value, or `None` when missing or blank
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
