//! Request line model
//!
//! Only the method and path of the first line are interpreted. Headers are
//! never parsed beyond what the connection loop needs to drain them.

use std::fmt;

use crate::error::{Result, ServerError};

/// HTTP method of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    /// Any other token; always answered with a 404
    Other(String),
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::Other(token) => f.write_str(token),
        }
    }
}

/// The first two components of a request's first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Request method
    pub method: Method,
    /// Request target, as sent
    pub path: String,
}

impl RequestLine {
    /// Parses the method and path out of raw request bytes.
    ///
    /// Anything after the first line is ignored, as is the protocol version.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let first_line = raw
            .split(|&b| b == b'\n')
            .next()
            .unwrap_or_default();
        let text = String::from_utf8_lossy(first_line);
        let mut parts = text.split_whitespace();

        match (parts.next(), parts.next()) {
            (Some(method), Some(path)) => Ok(Self {
                method: Method::parse(method),
                path: path.to_string(),
            }),
            _ => Err(ServerError::MalformedRequest(text.trim().to_string())),
        }
    }
}
