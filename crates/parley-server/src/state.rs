use std::sync::Arc;

use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_s3::Client as S3Client;

use parley_telemetry::firehose::FirehoseTransport;
use parley_telemetry::pipeline::Telemetry;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub bedrock: BedrockClient,
    pub s3: S3Client,
    pub bucket: String,
    pub model_id: String,
    pub system_prompt: String,
    pub telemetry: Arc<Telemetry<FirehoseTransport>>,
}
