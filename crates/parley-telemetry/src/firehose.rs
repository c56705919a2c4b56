//! Production transport: one Kinesis Data Firehose delivery stream.
//!
//! The delivery stream name and credentials are fixed at process start via
//! the shared `SdkConfig`. `open` validates the destination with
//! `DescribeDeliveryStream` so auth rejections and missing streams surface
//! as initialization failures rather than on the first submit.

use std::time::Duration;

use aws_sdk_firehose::Client;
use aws_sdk_firehose::error::SdkError;
use aws_sdk_firehose::operation::describe_delivery_stream::DescribeDeliveryStreamError;
use aws_sdk_firehose::operation::put_record::PutRecordError;
use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use async_trait::async_trait;
use tracing::info;

use crate::record::InteractionRecord;
use crate::transport::{Transport, TransportError, TransportSession};

pub struct FirehoseTransport {
    client: Client,
    stream_name: String,
    ack_timeout: Duration,
}

impl FirehoseTransport {
    pub fn new(
        config: &aws_config::SdkConfig,
        stream_name: impl Into<String>,
        ack_timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(config),
            stream_name: stream_name.into(),
            ack_timeout,
        }
    }
}

#[async_trait]
impl Transport for FirehoseTransport {
    type Session = FirehoseSession;

    async fn open(&self) -> Result<FirehoseSession, TransportError> {
        self.client
            .describe_delivery_stream()
            .delivery_stream_name(&self.stream_name)
            .send()
            .await
            .map_err(classify_open_error)?;

        info!(stream = %self.stream_name, "ingestion destination validated");

        Ok(FirehoseSession {
            client: self.client.clone(),
            stream_name: self.stream_name.clone(),
            ack_timeout: self.ack_timeout,
        })
    }
}

pub struct FirehoseSession {
    client: Client,
    stream_name: String,
    ack_timeout: Duration,
}

#[async_trait]
impl TransportSession for FirehoseSession {
    async fn submit(&mut self, record: &InteractionRecord) -> Result<(), TransportError> {
        let mut payload =
            serde_json::to_vec(record).map_err(|e| TransportError::transient(e.to_string()))?;
        // Firehose concatenates records at the destination; newline-delimit
        // them so the landed objects stay line-parseable.
        payload.push(b'\n');

        let data = Record::builder()
            .data(Blob::new(payload))
            .build()
            .map_err(|e| TransportError::transient(e.to_string()))?;

        let put = self
            .client
            .put_record()
            .delivery_stream_name(&self.stream_name)
            .record(data)
            .send();

        match tokio::time::timeout(self.ack_timeout, put).await {
            Ok(Ok(_ack)) => Ok(()),
            Ok(Err(e)) => Err(classify_submit_error(e)),
            // A hung acknowledgment usually means the stream was silently
            // dropped; treat it as session-fatal so the next attempt rebuilds.
            Err(_) => Err(TransportError::connection(format!(
                "acknowledgment timed out after {}ms",
                self.ack_timeout.as_millis()
            ))),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        // The Firehose client is connectionless; dropping the session is
        // sufficient teardown.
        Ok(())
    }
}

fn classify_open_error(e: SdkError<DescribeDeliveryStreamError>) -> TransportError {
    match &e {
        SdkError::ServiceError(ctx) => {
            let svc = ctx.err();
            if svc.is_resource_not_found_exception() {
                TransportError::connection(format!("delivery stream not found: {svc}"))
            } else {
                TransportError::auth(svc.to_string())
            }
        }
        _ => TransportError::connection(e.to_string()),
    }
}

fn classify_submit_error(e: SdkError<PutRecordError>) -> TransportError {
    match &e {
        SdkError::ServiceError(ctx) => {
            let svc = ctx.err();
            if svc.is_resource_not_found_exception() {
                TransportError::connection(svc.to_string())
            } else {
                // Throttling and per-record rejections leave the session
                // usable.
                TransportError::transient(svc.to_string())
            }
        }
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            TransportError::connection(e.to_string())
        }
        _ => TransportError::transient(e.to_string()),
    }
}
