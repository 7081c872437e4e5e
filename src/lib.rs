//! Outbound HTTP request preparation and logging.
//!
//! Requests are prepared (correlation ID, full URL, body encoding, required
//! headers), logged, sent through a pluggable transport, and their outcome
//! logged again under the same correlation ID.

pub mod config;
pub mod http;
pub mod observability;

pub use config::ClientConfig;
pub use http::{Body, Client, ClientError, Request, Response};
