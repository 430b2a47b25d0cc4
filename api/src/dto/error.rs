use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

/// Body of every failed request
///
/// ```json
/// { "success": false, "error": "invalid_otp", "attemptsLeft": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(rename = "attemptsLeft", skip_serializing_if = "Option::is_none", default)]
    pub attempts_left: Option<u32>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            attempts_left: None,
        }
    }

    pub fn with_attempts_left(mut self, attempts_left: u32) -> Self {
        self.attempts_left = Some(attempts_left);
        self
    }

    pub fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
