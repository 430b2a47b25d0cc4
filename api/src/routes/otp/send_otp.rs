use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use og_core::{ChallengeStore, Channel, DeliveryService};
use og_shared::recipient::{is_valid_email, is_valid_phone, mask_recipient};

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::ApiError;

use super::present;

/// Handler for POST /send-otp
///
/// # Request Body
///
/// ```json
/// { "type": "sms", "to": "+15551234567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "method": "sms", "message": "otp_sent" }
/// ```
///
/// ## Errors
/// - 400 `type_and_to_required`, `invalid_type`, `invalid_recipient`
/// - 500 `sms_not_configured`, `email_not_configured`, `delivery_failed`, `server_error`
pub async fn send_otp<S, D>(
    state: web::Data<AppState<S, D>>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: ChallengeStore + 'static,
    D: DeliveryService + 'static,
{
    let request = request.into_inner();

    let (channel, to) = match (present(request.channel.as_deref()), present(request.to.as_deref())) {
        (Some(channel), Some(to)) => (channel, to),
        _ => return Err(ApiError::TypeAndToRequired),
    };

    let channel: Channel = channel.parse().map_err(|_| ApiError::InvalidType)?;

    let well_formed = match channel {
        Channel::Sms => is_valid_phone(to),
        Channel::Email => is_valid_email(to),
    };
    if !well_formed || request.validate().is_err() {
        return Err(ApiError::InvalidRecipient);
    }

    info!(
        recipient = %mask_recipient(to),
        channel = %channel,
        "Processing send-otp request"
    );

    state
        .otp_service
        .issue(to, channel)
        .await
        .map_err(ApiError::from_issue)?;

    Ok(HttpResponse::Ok().json(SendOtpResponse::sent(channel)))
}
