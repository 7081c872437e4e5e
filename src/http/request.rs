//! Outbound request descriptor and preparation.
//!
//! # Responsibilities
//! - Assign a correlation ID when the caller did not supply one
//! - Resolve the full URL against the client's base URL
//! - Select the body marshaller from the `Content-Type` header
//! - Default the `Content-Type` and `X-Request-ID` headers
//! - Serialize the body exactly once
//!
//! # Design Decisions
//! - Raw string bodies are treated as pre-encoded and bypass the marshaller
//! - The base URL and path are concatenated as-is, without slash normalization
//! - Preparation only mutates the descriptor; it performs no I/O

use serde::Serialize;

use crate::http::header::{Header, APPLICATION_JSON, CONTENT_TYPE, X_REQUEST_ID};
use crate::http::marshal::{MarshalError, Marshaller};
use crate::http::request_id::IdGenerator;

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<T = serde_json::Value> {
    /// Pre-encoded content, sent byte for byte.
    Raw(String),
    /// A value encoded by the selected marshaller.
    Structured(T),
}

impl<T> From<String> for Body<T> {
    fn from(s: String) -> Self {
        Body::Raw(s)
    }
}

impl<T> From<&str> for Body<T> {
    fn from(s: &str) -> Self {
        Body::Raw(s.to_string())
    }
}

/// One outbound call.
///
/// Callers fill the public fields, then [`Request::prepare`] computes the
/// full URL, the marshaller and the encoded body.
#[derive(Debug, Clone)]
pub struct Request<T = serde_json::Value> {
    /// Path appended to the base URL.
    pub url: String,
    /// HTTP method (e.g. "GET").
    pub method: String,
    /// Correlation ID; generated during preparation when empty.
    pub request_id: String,
    /// Request body; `None` is encoded as JSON `null`, or as nothing under XML.
    pub body: Option<Body<T>>,
    pub header: Header,

    pub hide_log_request: bool,
    pub hide_log_response: bool,
    pub unlimit_log_request_body: bool,
    pub unlimit_log_response_body: bool,

    full_url: String,
    encoded_body: Vec<u8>,
    marshaller: Marshaller,
}

impl<T> Default for Request<T> {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: String::new(),
            request_id: String::new(),
            body: None,
            header: Header::new(),
            hide_log_request: false,
            hide_log_response: false,
            unlimit_log_request_body: false,
            unlimit_log_response_body: false,
            full_url: String::new(),
            encoded_body: Vec::new(),
            marshaller: Marshaller::default(),
        }
    }
}

impl<T> Request<T> {
    /// Create a request for `method` on `url` (a path relative to the base URL).
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.header.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Body<T>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_structured_body(mut self, value: T) -> Self {
        self.body = Some(Body::Structured(value));
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Full URL resolved during preparation.
    pub fn full_url(&self) -> &str {
        &self.full_url
    }

    /// Encoded body produced during preparation.
    pub fn body_bytes(&self) -> &[u8] {
        &self.encoded_body
    }

    /// Encoded body as text, decoded lossily.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.encoded_body).into_owned()
    }

    /// Marshaller selected during preparation.
    pub fn marshaller(&self) -> Marshaller {
        self.marshaller
    }

    fn init_request_id(&mut self, ids: &dyn IdGenerator) {
        if self.request_id.is_empty() {
            self.request_id = ids.new_id();
        }
    }

    fn init_full_url(&mut self, base_url: &str) {
        self.full_url = format!("{}{}", base_url, self.url);
    }

    fn select_marshaller(&mut self) {
        self.marshaller = Marshaller::for_content_type(self.header.get(CONTENT_TYPE).map(String::as_str));
    }

    fn init_required_headers(&mut self) {
        if !self.header.contains_key(CONTENT_TYPE) {
            self.header.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        }
        if !self.header.contains_key(X_REQUEST_ID) {
            self.header.insert(X_REQUEST_ID.to_string(), self.request_id.clone());
        }
    }
}

impl<T: Serialize> Request<T> {
    /// Prepare the request for sending.
    ///
    /// Returns an error only when the body cannot be encoded in the selected
    /// format; the request must not be sent in that case.
    pub fn prepare(&mut self, base_url: &str, ids: &dyn IdGenerator) -> Result<(), MarshalError> {
        self.init_request_id(ids);
        self.init_full_url(base_url);
        self.select_marshaller();
        self.init_required_headers();
        self.marshal_body()
    }

    fn marshal_body(&mut self) -> Result<(), MarshalError> {
        self.encoded_body = match &self.body {
            Some(Body::Raw(s)) => s.as_bytes().to_vec(),
            Some(Body::Structured(value)) => self.marshaller.marshal(value)?,
            None => match self.marshaller {
                Marshaller::Json => self.marshaller.marshal(&())?,
                Marshaller::Xml => Vec::new(),
            },
        };
        Ok(())
    }
}
