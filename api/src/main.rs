use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use og_api::{configure, middleware::create_cors, telemetry::init_tracing, AppState};
use og_core::{MemoryChallengeStore, OtpService, OtpServiceConfig};
use og_infra::{spawn_expiry_sweeper, ChannelDelivery};
use og_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        digit_width = config.otp.digit_width,
        ttl_ms = config.otp.ttl_ms,
        max_attempts = config.otp.max_attempts,
        "Starting OtpGate API server"
    );

    let delivery = ChannelDelivery::from_config(&config.delivery)
        .context("failed to initialize delivery providers")?;

    let otp_service = Arc::new(OtpService::new(
        Arc::new(MemoryChallengeStore::new()),
        Arc::new(delivery),
        OtpServiceConfig::from(&config.otp),
    ));

    let sweeper = spawn_expiry_sweeper(
        otp_service.clone(),
        Duration::from_secs(config.otp.sweep_interval_secs.max(1)),
    );

    let state = web::Data::new(AppState::new(otp_service));
    let environment = config.environment;
    let server_config = config.server.clone();
    let bind_address = config.server.bind_address();

    info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(environment, &server_config))
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(configure::<MemoryChallengeStore, ChannelDelivery>)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    sweeper.abort();
    info!("Server stopped");

    result.context("server terminated with an error")
}
