// Backend client implementation
// Single-attempt HTTP forwarding to the configured backend origin

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use bytes::Bytes;
use reqwest::{header, Client};
use serde_json::Value;
use tokio::time::Duration;

/// Status and raw body of a completed backend call
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Outbound network seam. The gateway only ever issues one call per inbound
/// request; no retry or backoff lives behind this trait.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// JSON call with an optional bearer credential
    async fn send_json(
        &self,
        method: Method,
        url: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ForwardedResponse, String>;

    /// Raw byte passthrough (webhook delivery), preserving the inbound
    /// content type and platform signature header untouched
    async fn send_raw(
        &self,
        method: Method,
        url: &str,
        content_type: Option<&str>,
        signature: Option<&str>,
        body: Bytes,
    ) -> Result<ForwardedResponse, String>;
}

/// Telephony platform signature header, relayed verbatim on webhooks
pub const VOICE_SIGNATURE_HEADER: &str = "x-voice-signature";

pub struct BackendClient {
    http_client: Client,
}

impl BackendClient {
    pub fn new(request_timeout_secs: u64) -> Result<Self, String> {
        let http_client = Client::builder()
            // Connection settings (optimize connection reuse, reduce overhead)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Forwarder for BackendClient {
    async fn send_json(
        &self,
        method: Method,
        url: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ForwardedResponse, String> {
        let mut request = self
            .http_client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Backend request failed at {}: {}", url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read backend response from {}: {}", url, e))?;

        Ok(ForwardedResponse { status, body })
    }

    async fn send_raw(
        &self,
        method: Method,
        url: &str,
        content_type: Option<&str>,
        signature: Option<&str>,
        body: Bytes,
    ) -> Result<ForwardedResponse, String> {
        let mut request = self.http_client.request(method, url);

        if let Some(ct) = content_type {
            request = request.header(header::CONTENT_TYPE, ct);
        }
        if let Some(sig) = signature {
            request = request.header(VOICE_SIGNATURE_HEADER, sig);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| format!("Webhook delivery failed at {}: {}", url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read webhook response from {}: {}", url, e))?;

        Ok(ForwardedResponse { status, body })
    }
}
