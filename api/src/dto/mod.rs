pub mod error;
pub mod otp;

pub use error::ErrorBody;
pub use otp::{
    HealthResponse, OtpValue, SendOtpRequest, SendOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
