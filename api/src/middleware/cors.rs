//! CORS middleware configuration for cross-origin requests.
//!
//! Browsers call the OTP endpoints directly, so CORS is permissive by
//! default. In production an `ALLOWED_ORIGINS` list narrows it down.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use og_shared::{Environment, ServerConfig};

/// Preflight cache lifetime in seconds
const MAX_AGE_SECS: usize = 3600;

/// Creates a CORS middleware instance configured for the environment.
///
/// Any origin is allowed unless the environment is production and
/// `server.allowed_origins` is non-empty.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_production() && !server.allowed_origins.is_empty() {
        create_restricted_cors(&server.allowed_origins)
    } else {
        Cors::permissive().max_age(MAX_AGE_SECS)
    }
}

fn create_restricted_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(MAX_AGE_SECS);

    for origin in allowed_origins {
        info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_rt::test]
    async fn test_development_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &ServerConfig::default()))
                .route("/health", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://anywhere.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_rt::test]
    async fn test_production_restricts_origins() {
        let server = ServerConfig {
            allowed_origins: vec!["https://app.example".to_string()],
            ..ServerConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &server))
                .route("/health", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://app.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example"
        );
    }
}
