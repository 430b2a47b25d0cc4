//! Mapping of service outcomes to HTTP responses

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use og_core::OtpError;
use tracing::{error, warn};

use crate::dto::ErrorBody;

/// Errors returned by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Both type and to are required")]
    TypeAndToRequired,

    #[error("Unsupported delivery type")]
    InvalidType,

    #[error("Recipient is not valid for the delivery type")]
    InvalidRecipient,

    #[error("Both to and otp are required")]
    ToAndOtpRequired,

    #[error("Malformed JSON body: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl ApiError {
    /// Machine-readable code carried in the `error` field
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::TypeAndToRequired => "type_and_to_required",
            ApiError::InvalidType => "invalid_type",
            ApiError::InvalidRecipient => "invalid_recipient",
            ApiError::ToAndOtpRequired => "to_and_otp_required",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::Otp(err) => err.error_code(),
        }
    }

    /// Convert an `issue` failure, where a rejected request means a bad recipient
    pub fn from_issue(err: OtpError) -> Self {
        match err {
            OtpError::InvalidRequest { .. } => ApiError::InvalidRecipient,
            other => ApiError::Otp(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Otp(OtpError::TooManyAttempts) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Otp(OtpError::DeliveryUnavailable { .. })
            | ApiError::Otp(OtpError::DeliveryFailed { .. })
            | ApiError::Otp(OtpError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, error_code = self.error_code(), "Request failed");
        } else {
            warn!(error_code = self.error_code(), "Request rejected");
        }

        let body = match self {
            ApiError::Otp(OtpError::InvalidCode { attempts_remaining }) => {
                ErrorBody::new(self.error_code()).with_attempts_left(*attempts_remaining)
            }
            _ => ErrorBody::new(self.error_code()),
        };
        body.to_response(status)
    }
}

/// Turns JSON extractor failures into the API's error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidJson(err.to_string()).into()
}
