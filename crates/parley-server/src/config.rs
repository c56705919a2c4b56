use std::env;
use std::time::Duration;

use parley_telemetry::backoff::RetryPolicy;
use parley_telemetry::record::DEFAULT_TEXT_LIMIT;

/// Process configuration, read from the environment once at startup and
/// held fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub model_id: String,
    pub system_prompt: String,
    pub telemetry_stream: String,
    pub bucket: String,
    pub retry_policy: RetryPolicy,
    pub text_limit: usize,
    pub ack_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let model_id = env::var("PARLEY_MODEL_ID")
            .map_err(|_| eyre::eyre!("PARLEY_MODEL_ID must be set"))?;
        let telemetry_stream = env::var("PARLEY_TELEMETRY_STREAM")
            .map_err(|_| eyre::eyre!("PARLEY_TELEMETRY_STREAM must be set"))?;

        let retry_policy = RetryPolicy {
            max_attempts: env_u64("PARLEY_MAX_ATTEMPTS", 3)? as u32,
            base_backoff: Duration::from_millis(env_u64("PARLEY_BACKOFF_BASE_MS", 1000)?),
            backoff_ceiling: Duration::from_millis(env_u64("PARLEY_BACKOFF_CEILING_MS", 8000)?),
        };

        Ok(Self {
            bind: env::var("PARLEY_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            model_id,
            system_prompt: env::var("PARLEY_SYSTEM_PROMPT")
                .unwrap_or_else(|_| "You are a helpful assistant.".to_string()),
            telemetry_stream,
            bucket: env::var("PARLEY_BUCKET").unwrap_or_else(|_| "parley".to_string()),
            retry_policy,
            text_limit: env_u64("PARLEY_TEXT_LIMIT", DEFAULT_TEXT_LIMIT as u64)? as usize,
            ack_timeout: Duration::from_millis(env_u64("PARLEY_ACK_TIMEOUT_MS", 10_000)?),
        })
    }
}

fn env_u64(name: &str, default: u64) -> eyre::Result<u64> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| eyre::eyre!("{name} must be an integer, got {value:?}")),
        Err(_) => Ok(default),
    }
}
