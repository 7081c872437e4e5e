//! HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! caller builds Request
//!     → request.rs (request ID, full URL, marshaller, headers, body)
//!     → observability::logger (request record)
//!     → transport.rs (send over reqwest)
//!     → response.rs (status, headers, buffered body)
//!     → observability::logger (response or error record)
//! ```

pub mod client;
pub mod header;
pub mod marshal;
pub mod request;
pub mod request_id;
pub mod response;
pub mod transport;

pub use client::{Client, ClientError};
pub use header::{Header, CONTENT_TYPE, X_REQUEST_ID};
pub use marshal::{MarshalError, Marshaller};
pub use request::{Body, Request};
pub use request_id::{IdGenerator, UuidGenerator};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport, TransportError};
