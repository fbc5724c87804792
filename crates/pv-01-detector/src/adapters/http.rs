//! HTTP detector client
//!
//! Implements `DetectorApi` over a multipart POST to a detector node.

use crate::domain::{describe_failure, parse_vote, DetectionRequest, DetectorError, Vote};
use crate::ports::DetectorApi;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Multipart field the detector nodes read the upload from.
pub const FILE_FIELD: &str = "file";

/// Upper bound on a detector response body. Verdicts are a few dozen bytes.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// reqwest-backed detector client.
///
/// One `Client` (and its connection pool) is shared across all nodes.
#[derive(Clone)]
pub struct HttpDetectorClient {
    client: Client,
}

impl HttpDetectorClient {
    /// Create a client with a default connect timeout.
    pub fn new() -> Result<Self, DetectorError> {
        Self::with_connect_timeout(Duration::from_secs(5))
    }

    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self, DetectorError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| DetectorError::Network {
                endpoint: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    async fn send(&self, endpoint: &str, request: &DetectionRequest) -> Result<Vote, DetectorError> {
        let part = Part::bytes(request.bytes().to_vec())
            .file_name(request.file_name().to_string())
            .mime_str(request.mime_type())
            .map_err(|e| DetectorError::InvalidRequest {
                endpoint: endpoint.to_string(),
                reason: format!("invalid MIME type {}: {}", request.mime_type(), e),
            })?;
        let form = Form::new().part(FILE_FIELD, part);

        let mut response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DetectorError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = read_capped_body(&mut response, endpoint).await?;

        if !status.is_success() {
            return Err(describe_failure(status.as_u16(), &body).at(endpoint));
        }

        parse_vote(&body).map_err(|e| e.at(endpoint))
    }
}

fn body_too_large(endpoint: &str) -> DetectorError {
    DetectorError::InvalidResponse {
        endpoint: endpoint.to_string(),
        reason: format!("body exceeds {} bytes", MAX_RESPONSE_BYTES),
    }
}

/// Read the body chunk by chunk, giving up once it passes `MAX_RESPONSE_BYTES`.
async fn read_capped_body(
    response: &mut reqwest::Response,
    endpoint: &str,
) -> Result<Vec<u8>, DetectorError> {
    if matches!(response.content_length(), Some(n) if n > MAX_RESPONSE_BYTES as u64) {
        return Err(body_too_large(endpoint));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| DetectorError::Network {
        endpoint: endpoint.to_string(),
        message: format!("failed to read body: {}", e),
    })? {
        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            return Err(body_too_large(endpoint));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[async_trait]
impl DetectorApi for HttpDetectorClient {
    async fn query(
        &self,
        endpoint: &str,
        request: &DetectionRequest,
        timeout: Duration,
    ) -> Result<Vote, DetectorError> {
        let started = Instant::now();

        // Dropping the send future on expiry aborts this node's request only.
        let result = match tokio::time::timeout(timeout, self.send(endpoint, request)).await {
            Ok(result) => result,
            Err(_) => Err(DetectorError::Timeout {
                endpoint: endpoint.to_string(),
                after: timeout,
            }),
        };

        debug!(
            endpoint,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "[pv-01] detector query finished"
        );
        result
    }
}
