//! Transport seam between the client and the network.
//!
//! # Responsibilities
//! - Send a prepared request and buffer the response
//! - Report network failures as [`TransportError`]
//!
//! # Design Decisions
//! - Timeouts live on the transport; the client imposes none of its own
//! - No retries: a failed send is returned to the caller once

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use thiserror::Error;

use crate::config::TimeoutConfig;
use crate::http::header::{from_header_map, Header};
use crate::http::response::Response;

/// Errors raised while sending a request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Sends prepared requests.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        method: &str,
        url: &str,
        header: &Header,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the configured timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: &str,
        url: &str,
        header: &Header,
        body: Vec<u8>,
    ) -> Result<Response, TransportError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(method.to_string()))?;
        let headers = to_header_map(header)?;

        let res = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = res.status();
        let header = from_header_map(res.headers());
        let body = res.bytes().await?.to_vec();

        Ok(Response { status, header, body })
    }
}

fn to_header_map(header: &Header) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(header.len());
    for (name, value) in header {
        let invalid = |reason: String| TransportError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(key, value);
    }
    Ok(map)
}
