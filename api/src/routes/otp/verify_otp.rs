use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use og_core::{ChallengeStore, DeliveryService};
use og_shared::recipient::mask_recipient;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::ApiError;

use super::present;

/// Handler for POST /verify-otp
///
/// # Request Body
///
/// ```json
/// { "to": "+15551234567", "otp": "04217" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "verified" }
/// ```
///
/// ## Errors
/// - 400 `to_and_otp_required`, `no_active_otp`, `otp_expired`
/// - 400 `invalid_otp` with `attemptsLeft`
/// - 429 `too_many_attempts`
pub async fn verify_otp<S, D>(
    state: web::Data<AppState<S, D>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: ChallengeStore + 'static,
    D: DeliveryService + 'static,
{
    let request = request.into_inner();

    let code = request.otp.as_ref().map(|otp| otp.as_code());
    let (to, code) = match (present(request.to.as_deref()), present(code.as_deref())) {
        (Some(to), Some(code)) => (to, code),
        _ => return Err(ApiError::ToAndOtpRequired),
    };

    // An over-long recipient can never have a challenge
    if request.validate().is_err() {
        return Err(ApiError::Otp(og_core::OtpError::NoActiveChallenge));
    }

    info!(recipient = %mask_recipient(to), "Processing verify-otp request");

    state.otp_service.verify(to, code).await?;

    Ok(HttpResponse::Ok().json(VerifyOtpResponse::verified()))
}
