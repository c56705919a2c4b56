use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use parley_telemetry::backoff::TokioSleeper;
use parley_telemetry::firehose::FirehoseTransport;
use parley_telemetry::pipeline::Telemetry;
use parley_telemetry::shutdown::ShutdownGuard;

mod config;
mod error;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for the hosting platform's log stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let transport = FirehoseTransport::new(
        &aws_config,
        config.telemetry_stream.clone(),
        config.ack_timeout,
    );
    let telemetry = Arc::new(Telemetry::with_sleeper(
        transport,
        config.retry_policy.clone(),
        config.text_limit,
        TokioSleeper,
    ));

    // Initialize the stream eagerly so auth problems surface at startup.
    // A failure here is not fatal: the first delivery re-acquires lazily.
    if let Err(e) = telemetry.handle().acquire(false).await {
        warn!(error = %e, "telemetry stream unavailable at startup");
    }

    let state = AppState {
        bedrock: aws_sdk_bedrockruntime::Client::new(&aws_config),
        s3: aws_sdk_s3::Client::new(&aws_config),
        bucket: config.bucket.clone(),
        model_id: config.model_id.clone(),
        system_prompt: config.system_prompt.clone(),
        telemetry: Arc::clone(&telemetry),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/chat", post(routes::chat::post_chat))
        .route("/sessions", get(routes::sessions::list_sessions))
        .route("/sessions/{id}", get(routes::sessions::get_session))
        .layer(cors)
        .with_state(state);

    let guard = ShutdownGuard::new(telemetry);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(addr = %config.bind, model = %config.model_id, "parley listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(guard))
        .await?;

    Ok(())
}

/// Wait for ctrl-c, then close the telemetry stream exactly once before the
/// server drains.
async fn shutdown_signal(guard: ShutdownGuard<FirehoseTransport>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
    guard.shutdown().await;
}
