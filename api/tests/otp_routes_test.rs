//! HTTP tests for the OTP endpoints

use actix_web::{http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use og_api::{configure, AppState};
use og_core::services::otp::{FixedCodeGenerator, MockClock};
use og_core::{MemoryChallengeStore, OtpService, OtpServiceConfig};
use og_infra::email::{EmailService, MockEmailService};
use og_infra::sms::{MockSmsService, SmsService};
use og_infra::ChannelDelivery;

type State = AppState<MemoryChallengeStore, ChannelDelivery>;

struct Fixture {
    state: web::Data<State>,
    clock: Arc<MockClock>,
    sms: Arc<MockSmsService>,
}

fn fixture(with_sms: bool, codes: &[&str]) -> Fixture {
    let sms = Arc::new(MockSmsService::silent());
    let email = Arc::new(MockEmailService::silent());
    let delivery = ChannelDelivery::new(
        with_sms.then(|| sms.clone() as Arc<dyn SmsService>),
        Some(email as Arc<dyn EmailService>),
    );
    let clock = Arc::new(MockClock::new(Utc::now()));
    let service = OtpService::new(
        Arc::new(MemoryChallengeStore::new()),
        Arc::new(delivery),
        OtpServiceConfig::default(),
    )
    .with_clock(clock.clone())
    .with_code_generator(Arc::new(FixedCodeGenerator::new(codes.iter().copied())));

    Fixture {
        state: web::Data::new(AppState::new(Arc::new(service))),
        clock,
        sms,
    }
}

macro_rules! app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .app_data($fixture.state.clone())
                .configure(configure::<MemoryChallengeStore, ChannelDelivery>),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_rt::test]
async fn test_health() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "ok": true }));
}

#[actix_rt::test]
async fn test_send_and_verify_sms() {
    let f = fixture(true, &["04217"]);
    let app = app!(f);

    let (status, body) = post!(app, "/send-otp", json!({ "type": "sms", "to": "+15551234567" }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "method": "sms", "message": "otp_sent" }));

    // The code goes to the recipient, never into the response
    assert!(!body.to_string().contains("04217"));
    let sms = f.sms.last_message_to("+15551234567").unwrap();
    assert!(sms.body.contains("04217"));

    let (status, body) = post!(app, "/verify-otp", json!({ "to": "+15551234567", "otp": "04217" }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "verified" }));

    let (status, body) = post!(app, "/verify-otp", json!({ "to": "+15551234567", "otp": "04217" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no_active_otp");
}

#[actix_rt::test]
async fn test_numeric_otp_is_accepted() {
    let f = fixture(true, &["54217"]);
    let app = app!(f);

    post!(app, "/send-otp", json!({ "type": "email", "to": "someone@example.com" }));
    let (status, _) = post!(app, "/verify-otp", json!({ "to": "someone@example.com", "otp": 54217 }));
    assert_eq!(status, StatusCode::OK);
}

#[actix_rt::test]
async fn test_send_missing_fields() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    for body in [json!({}), json!({ "type": "sms" }), json!({ "to": "+15551234567" }), json!({ "type": " ", "to": "+15551234567" })] {
        let (status, body) = post!(app, "/send-otp", body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "type_and_to_required" }));
    }
}

#[actix_rt::test]
async fn test_send_invalid_type_and_recipient() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    let (status, body) = post!(app, "/send-otp", json!({ "type": "fax", "to": "+15551234567" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_type");

    let (status, body) = post!(app, "/send-otp", json!({ "type": "email", "to": "+15551234567" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_recipient");

    for to in ["user-42", "15551234567"] {
        let (status, body) = post!(app, "/send-otp", json!({ "type": "sms", "to": to }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_recipient");
    }
    assert_eq!(f.sms.get_message_count(), 0);
}

#[actix_rt::test]
async fn test_send_unconfigured_channel() {
    let f = fixture(false, &["11111"]);
    let app = app!(f);

    let (status, body) = post!(app, "/send-otp", json!({ "type": "sms", "to": "+15551234567" }));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "sms_not_configured" }));
}

#[actix_rt::test]
async fn test_send_delivery_failure() {
    let f = fixture(true, &["11111"]);
    f.sms.set_simulate_failure(true);
    let app = app!(f);

    let (status, body) = post!(app, "/send-otp", json!({ "type": "sms", "to": "+15551234567" }));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "delivery_failed");

    let (_, body) = post!(app, "/verify-otp", json!({ "to": "+15551234567", "otp": "11111" }));
    assert_eq!(body["error"], "no_active_otp");
}

#[actix_rt::test]
async fn test_verify_missing_fields() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    for body in [json!({}), json!({ "to": "+15551234567" }), json!({ "otp": "11111" }), json!({ "to": "", "otp": "11111" })] {
        let (status, body) = post!(app, "/verify-otp", body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "to_and_otp_required");
    }
}

#[actix_rt::test]
async fn test_wrong_codes_then_too_many_attempts() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    post!(app, "/send-otp", json!({ "type": "sms", "to": "+15551234567" }));

    for attempts_left in [4, 3, 2, 1] {
        let (status, body) = post!(app, "/verify-otp", json!({ "to": "+15551234567", "otp": "99999" }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "success": false, "error": "invalid_otp", "attemptsLeft": attempts_left })
        );
    }

    let (status, body) = post!(app, "/verify-otp", json!({ "to": "+15551234567", "otp": "99999" }));
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({ "success": false, "error": "too_many_attempts" }));
}

#[actix_rt::test]
async fn test_expired_code() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    post!(app, "/send-otp", json!({ "type": "sms", "to": "+15551234567" }));
    f.clock.advance(Duration::minutes(5) + Duration::seconds(1));

    let (status, body) = post!(app, "/verify-otp", json!({ "to": "+15551234567", "otp": "11111" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_expired");
}

#[actix_rt::test]
async fn test_malformed_json() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_rt::test]
async fn test_unknown_route() {
    let f = fixture(true, &["11111"]);
    let app = app!(f);

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
