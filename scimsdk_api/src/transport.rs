//! The transport executor: the single place a request leaves the process.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::{Context, RequestEnvelope, TransportError};

/// Request timeout for the default transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status, headers and fully buffered body of an HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations do not interpret the status code; classification happens
/// in the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, envelope: RequestEnvelope) -> Result<RawResponse, TransportError>;
}

/// Default transport backed by `reqwest`.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    timeout: Duration,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ReqwestTransport {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, envelope: RequestEnvelope) -> Result<RawResponse, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                e
            })?;

        let mut request = client
            .request(envelope.method, envelope.url)
            .headers(envelope.headers);
        if let Some(body) = envelope.body {
            request = request.body(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            e
        })?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            e
        })?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Transport that answers every request with a closure. Meant for tests.
pub struct FnTransport<F> {
    responder: F,
}

impl<F> FnTransport<F>
where
    F: Fn(&RequestEnvelope) -> Result<RawResponse, TransportError> + Send + Sync,
{
    pub fn new(responder: F) -> Self {
        Self { responder }
    }
}

#[async_trait]
impl<F> Transport for FnTransport<F>
where
    F: Fn(&RequestEnvelope) -> Result<RawResponse, TransportError> + Send + Sync,
{
    async fn execute(&self, envelope: RequestEnvelope) -> Result<RawResponse, TransportError> {
        (self.responder)(&envelope)
    }
}

/// Runs `envelope` through `transport` under `ctx`.
///
/// An already finished context fails without touching the transport; a
/// context that finishes mid-flight abandons the in-flight request.
pub(crate) async fn execute_in_context(
    ctx: &Context,
    transport: &dyn Transport,
    envelope: RequestEnvelope,
) -> Result<RawResponse, TransportError> {
    if let Some(err) = ctx.err() {
        tracing::debug!("Context done before dispatch: {}", err);
        return Err(err);
    }
    tokio::select! {
        biased;
        err = ctx.done() => Err(err),
        resp = transport.execute(envelope) => resp,
    }
}
