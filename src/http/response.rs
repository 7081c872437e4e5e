//! Response returned by a transport.

use reqwest::StatusCode;

use crate::http::header::Header;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub header: Header,
    pub body: Vec<u8>,
}

impl Response {
    /// Status line as logged, e.g. "200 OK".
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    /// Body decoded lossily as UTF-8 text.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
