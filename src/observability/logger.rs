//! Request/response logging around a transport call.
//!
//! # Responsibilities
//! - Log method, URL, headers and body before a request is sent
//! - Log latency, status, headers and body after a response arrives
//! - Log only the URL and error when the transport failed
//!
//! # Design Decisions
//! - Per-request flags can hide either record or lift the body size limit
//! - Bodies are truncated on character boundaries with a visible marker
//! - Logging never reports failure back to the caller

use std::time::Duration;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::transport::TransportError;
use crate::observability::sink::{LogEntry, LogFields, LogSink};

/// Default maximum number of body characters kept in a log record.
pub const DEFAULT_MAX_BODY_CHARS: usize = 1000;

/// Appended to a body that was cut to the limit.
pub const TRUNCATED_MARKER: &str = "...(truncated)";

const REQUEST_MESSAGE: &str = "client do request information";
const RESPONSE_MESSAGE: &str = "client do response info";
const RESPONSE_ERROR_MESSAGE: &str = "client do response information";

/// Writes request and response records to a [`LogSink`].
#[derive(Debug, Clone)]
pub struct RequestLogger<S> {
    sink: S,
    max_body_chars: usize,
}

impl<S: LogSink> RequestLogger<S> {
    pub fn new(sink: S) -> Self {
        Self::with_max_body_chars(sink, DEFAULT_MAX_BODY_CHARS)
    }

    pub fn with_max_body_chars(sink: S, max_body_chars: usize) -> Self {
        Self { sink, max_body_chars }
    }

    /// Log a prepared request before it is sent.
    pub fn log_request<T>(&self, request: &Request<T>) {
        if request.hide_log_request {
            return;
        }

        let body = self.body_text(request.body_bytes(), request.unlimit_log_request_body);

        self.sink.log(&LogEntry {
            correlation_id: request.request_id.clone(),
            message: REQUEST_MESSAGE,
            fields: LogFields::Request {
                method: request.method.clone(),
                url: request.full_url().to_string(),
                header: request.header.clone(),
                body,
            },
        });
    }

    /// Log the outcome of sending `request`.
    pub fn log_response<T>(
        &self,
        request: &Request<T>,
        result: Result<&Response, &TransportError>,
        latency: Duration,
    ) {
        if request.hide_log_response {
            return;
        }

        let (message, fields) = match result {
            Err(err) => (
                RESPONSE_ERROR_MESSAGE,
                LogFields::TransportError {
                    url: request.full_url().to_string(),
                    error: err.to_string(),
                },
            ),
            Ok(res) => (
                RESPONSE_MESSAGE,
                LogFields::Response {
                    latency: format!("{:?}", latency),
                    status: res.status_line(),
                    header: res.header.clone(),
                    body: self.body_text(&res.body, request.unlimit_log_response_body),
                    url: request.full_url().to_string(),
                },
            ),
        };

        self.sink.log(&LogEntry {
            correlation_id: request.request_id.clone(),
            message,
            fields,
        });
    }

    fn body_text(&self, body: &[u8], unlimited: bool) -> String {
        let text = String::from_utf8_lossy(body);
        if unlimited {
            text.into_owned()
        } else {
            limit_body(&text, self.max_body_chars)
        }
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut.
pub fn limit_body(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{}", &text[..end], TRUNCATED_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::header::Header;
    use crate::http::request_id::UuidGenerator;
    use crate::observability::sink::RecordingSink;
    use reqwest::StatusCode;

    fn prepared(body: &str) -> Request {
        let mut req: Request = Request::new("POST", "/items").with_body(body);
        req.prepare("http://h", &UuidGenerator).unwrap();
        req
    }

    fn response(body: &str) -> Response {
        let mut header = Header::new();
        header.insert("content-type".into(), "text/plain".into());
        Response {
            status: StatusCode::OK,
            header,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_limit_body() {
        assert_eq!(limit_body("abc", 3), "abc");
        assert_eq!(limit_body("abcd", 3), "abc...(truncated)");
        assert_eq!(limit_body("", 3), "");
        assert_eq!(limit_body("héllo", 2), "hé...(truncated)");
    }

    #[test]
    fn test_request_record() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::new(sink.clone());
        let req = prepared("hello");

        logger.log_request(&req);

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].correlation_id, req.request_id);
        assert_eq!(entries[0].message, "client do request information");
        match &entries[0].fields {
            LogFields::Request { method, url, header, body } => {
                assert_eq!(method, "POST");
                assert_eq!(url, "http://h/items");
                assert_eq!(header, &req.header);
                assert_eq!(body, "hello");
            }
            other => panic!("unexpected fields: {:?}", other),
        }
    }

    #[test]
    fn test_hidden_request_log_emits_nothing() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::with_max_body_chars(sink.clone(), 2);
        let mut req = prepared("hello");
        req.hide_log_request = true;
        req.unlimit_log_request_body = true;

        logger.log_request(&req);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_request_body_truncation() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::with_max_body_chars(sink.clone(), 2);
        let mut req = prepared("hello");

        logger.log_request(&req);
        req.unlimit_log_request_body = true;
        logger.log_request(&req);

        let bodies: Vec<_> = sink
            .entries()
            .into_iter()
            .map(|e| match e.fields {
                LogFields::Request { body, .. } => body,
                other => panic!("unexpected fields: {:?}", other),
            })
            .collect();
        assert_eq!(bodies, vec!["he...(truncated)".to_string(), "hello".to_string()]);
    }

    #[test]
    fn test_response_record() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::with_max_body_chars(sink.clone(), 4);
        let req = prepared("");
        let res = response("response body");

        logger.log_response(&req, Ok(&res), Duration::from_millis(12));

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].correlation_id, req.request_id);
        assert_eq!(entries[0].message, "client do response info");
        match &entries[0].fields {
            LogFields::Response { latency, status, header, body, url } => {
                assert_eq!(latency, "12ms");
                assert_eq!(status, "200 OK");
                assert_eq!(header.get("content-type").map(String::as_str), Some("text/plain"));
                assert_eq!(body, "resp...(truncated)");
                assert_eq!(url, "http://h/items");
            }
            other => panic!("unexpected fields: {:?}", other),
        }
    }

    #[test]
    fn test_unlimited_response_body_is_verbatim() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::with_max_body_chars(sink.clone(), 4);
        let mut req = prepared("");
        req.unlimit_log_response_body = true;

        logger.log_response(&req, Ok(&response("response body")), Duration::from_millis(1));

        match &sink.entries()[0].fields {
            LogFields::Response { body, .. } => assert_eq!(body, "response body"),
            other => panic!("unexpected fields: {:?}", other),
        }
    }

    #[test]
    fn test_transport_error_record() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::new(sink.clone());
        let req = prepared("");
        let err = TransportError::InvalidMethod("GE T".into());

        logger.log_response(&req, Err(&err), Duration::from_millis(5));

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "client do response information");
        assert_eq!(
            entries[0].fields,
            LogFields::TransportError {
                url: "http://h/items".into(),
                error: "invalid HTTP method 'GE T'".into(),
            }
        );
    }

    #[test]
    fn test_hidden_response_log_emits_nothing() {
        let sink = RecordingSink::new();
        let logger = RequestLogger::new(sink.clone());
        let mut req = prepared("");
        req.hide_log_response = true;
        let err = TransportError::InvalidMethod("GE T".into());

        logger.log_response(&req, Ok(&response("ok")), Duration::from_millis(1));
        logger.log_response(&req, Err(&err), Duration::from_millis(1));
        assert!(sink.entries().is_empty());
    }
}
