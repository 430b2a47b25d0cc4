use og_core::Channel;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /send-otp`
///
/// Fields are optional so that a missing field yields the API's own error
/// code instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// "sms" or "email"
    #[serde(rename = "type", default)]
    pub channel: Option<String>,

    /// Phone number in E.164 format or email address, at most 254 characters
    #[serde(default)]
    #[validate(length(max = 254))]
    pub to: Option<String>,
}

/// A submitted code, accepted as a JSON string or number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OtpValue {
    Text(String),
    Number(u64),
}

impl OtpValue {
    /// The code as text; numbers lose any leading zeros the client dropped
    pub fn as_code(&self) -> String {
        match self {
            OtpValue::Text(text) => text.trim().to_string(),
            OtpValue::Number(number) => number.to_string(),
        }
    }
}

/// Body of `POST /verify-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(max = 254))]
    pub to: Option<String>,

    #[serde(default)]
    pub otp: Option<OtpValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub method: Channel,
    pub message: String,
}

impl SendOtpResponse {
    pub fn sent(method: Channel) -> Self {
        Self {
            success: true,
            method,
            message: "otp_sent".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
}

impl VerifyOtpResponse {
    pub fn verified() -> Self {
        Self {
            success: true,
            message: "verified".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_uses_type_field() {
        let request: SendOtpRequest =
            serde_json::from_str(r#"{"type":"sms","to":"+15551234567"}"#).unwrap();
        assert_eq!(request.channel.as_deref(), Some("sms"));
        assert_eq!(request.to.as_deref(), Some("+15551234567"));

        let empty: SendOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.channel.is_none() && empty.to.is_none());
    }

    #[test]
    fn test_recipient_length_is_validated() {
        let request = SendOtpRequest {
            channel: Some("email".to_string()),
            to: Some(format!("{}@example.com", "a".repeat(300))),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_otp_accepts_string_or_number() {
        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"to":"a@b.co","otp":"04217"}"#).unwrap();
        assert_eq!(request.otp.unwrap().as_code(), "04217");

        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"to":"a@b.co","otp":54217}"#).unwrap();
        assert_eq!(request.otp.unwrap().as_code(), "54217");
    }

    #[test]
    fn test_send_response_shape() {
        let json = serde_json::to_value(SendOtpResponse::sent(Channel::Email)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "method": "email", "message": "otp_sent" })
        );
    }
}
