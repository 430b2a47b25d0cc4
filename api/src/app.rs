//! Application state and route configuration
//!
//! The binary and the HTTP tests build their `App` from the same
//! [`configure`] function, so both exercise identical routing.

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use og_core::{ChallengeStore, DeliveryService, OtpService};

use crate::dto::ErrorBody;
use crate::handlers::json_error_handler;
use crate::routes::{
    health::health_check,
    otp::{send_otp, verify_otp},
};

/// Request bodies are tiny; anything larger is rejected
const JSON_LIMIT_BYTES: usize = 4 * 1024;

/// Application state that holds shared services
pub struct AppState<S, D>
where
    S: ChallengeStore,
    D: DeliveryService,
{
    pub otp_service: Arc<OtpService<S, D>>,
}

impl<S, D> AppState<S, D>
where
    S: ChallengeStore,
    D: DeliveryService,
{
    pub fn new(otp_service: Arc<OtpService<S, D>>) -> Self {
        Self { otp_service }
    }
}

/// Register routes, JSON handling and the fallback handler
pub fn configure<S, D>(cfg: &mut web::ServiceConfig)
where
    S: ChallengeStore + 'static,
    D: DeliveryService + 'static,
{
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(json_error_handler),
    )
    .route("/health", web::get().to(health_check))
    .route("/send-otp", web::post().to(send_otp::<S, D>))
    .route("/verify-otp", web::post().to(verify_otp::<S, D>))
    .default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("not_found"))
}
