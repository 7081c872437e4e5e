//! Body marshallers.
//!
//! # Responsibilities
//! - Map a `Content-Type` value to a body encoding
//! - Encode structured bodies as JSON or XML
//!
//! # Design Decisions
//! - Selection is a pure function of the header value, resolved once per request
//! - Unknown or missing content types fall back to JSON
//! - An encoding failure is final; there is no fallback to the other format

use serde::Serialize;
use thiserror::Error;

use crate::http::header::{APPLICATION_JSON, APPLICATION_XML, TEXT_XML};

/// Errors raised while encoding a request body.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The value could not be encoded as JSON.
    #[error("JSON marshal error: {0}")]
    Json(#[from] serde_json::Error),

    /// The value could not be encoded as XML.
    #[error("XML marshal error: {0}")]
    Xml(String),
}

/// Body encoding selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marshaller {
    #[default]
    Json,
    Xml,
}

impl Marshaller {
    /// Select a marshaller from a `Content-Type` value, compared case-insensitively.
    pub fn for_content_type(content_type: Option<&str>) -> Self {
        match content_type.map(str::to_lowercase).as_deref() {
            Some(APPLICATION_XML) | Some(TEXT_XML) => Marshaller::Xml,
            _ => Marshaller::Json,
        }
    }

    /// Canonical MIME type of this encoding.
    pub fn content_type(&self) -> &'static str {
        match self {
            Marshaller::Json => APPLICATION_JSON,
            Marshaller::Xml => APPLICATION_XML,
        }
    }

    /// Encode `value` in this format.
    pub fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, MarshalError> {
        match self {
            Marshaller::Json => Ok(serde_json::to_vec(value)?),
            Marshaller::Xml => quick_xml::se::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| MarshalError::Xml(e.to_string())),
        }
    }
}
