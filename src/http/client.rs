//! Client tying preparation, logging and transport together.
//!
//! # Responsibilities
//! - Prepare each request against the configured base URL
//! - Log the request before sending and the outcome after
//! - Time the transport call and record metrics
//!
//! # Design Decisions
//! - A marshal failure aborts before anything is logged or sent
//! - Transport errors are logged once and returned; never retried

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::http::marshal::MarshalError;
use crate::http::request::Request;
use crate::http::request_id::{IdGenerator, UuidGenerator};
use crate::http::response::Response;
use crate::http::transport::{ReqwestTransport, Transport, TransportError};
use crate::observability::logger::RequestLogger;
use crate::observability::metrics;
use crate::observability::sink::{LogSink, TracingSink};

/// Errors returned by [`Client::execute`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Outbound HTTP client.
pub struct Client<Tr = ReqwestTransport, S = TracingSink> {
    base_url: String,
    transport: Tr,
    ids: Box<dyn IdGenerator>,
    logger: RequestLogger<S>,
    metrics_enabled: bool,
}

impl Client {
    /// Build a client with the reqwest transport and tracing sink.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config.timeouts)?;
        let logger = RequestLogger::with_max_body_chars(TracingSink, config.logging.max_body_chars);
        Ok(Client::new(config.base_url.clone(), transport, logger)
            .with_metrics(config.metrics.enabled))
    }
}

impl<Tr: Transport, S: LogSink> Client<Tr, S> {
    pub fn new(base_url: impl Into<String>, transport: Tr, logger: RequestLogger<S>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            ids: Box::new(UuidGenerator),
            logger,
            metrics_enabled: true,
        }
    }

    /// Replace the correlation ID generator.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prepare, log, send and log `request`.
    pub async fn execute<T: Serialize>(&self, request: &mut Request<T>) -> Result<Response, ClientError> {
        request.prepare(&self.base_url, self.ids.as_ref())?;
        self.logger.log_request(request);

        let start = Instant::now();
        let result = self
            .transport
            .send(
                &request.method,
                request.full_url(),
                &request.header,
                request.body_bytes().to_vec(),
            )
            .await;
        let latency = start.elapsed();

        if self.metrics_enabled {
            match &result {
                Ok(res) => metrics::record_request(&request.method, res.status.as_u16(), latency),
                Err(_) => metrics::record_transport_error(&request.method, latency),
            }
        }

        self.logger.log_response(request, result.as_ref(), latency);
        result.map_err(ClientError::from)
    }
}

impl<Tr, S> std::fmt::Debug for Client<Tr, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}
