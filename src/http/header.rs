//! Header names, content types and the header mapping carried by a request.

use indexmap::IndexMap;

/// Header carrying the request's content type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header carrying the correlation ID of an outbound request.
pub const X_REQUEST_ID: &str = "X-Request-ID";

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const TEXT_XML: &str = "text/xml";

/// Plain string-keyed header mapping.
///
/// Keys are stored exactly as given and iterate in insertion order.
/// `content-type` and `Content-Type` are two distinct keys; inserting the
/// same exact key twice keeps the last value.
pub type Header = IndexMap<String, String>;

/// Flatten a transport header map into a [`Header`].
///
/// Repeated header names are joined with `", "`; values that are not valid
/// UTF-8 are decoded lossily.
pub fn from_header_map(map: &reqwest::header::HeaderMap) -> Header {
    let mut header = Header::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes());
        header
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    header
}
