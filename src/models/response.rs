//! Response model for the static content server
//!
//! Encodes the wire format sent back to clients: status line, `Date`,
//! `Connection: close`, `Content-Length`, `Content-Type`, blank line, body.
//! The head and the body are written separately, so there is no ceiling on
//! body size and binary bodies pass through untouched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::cache::CacheEntry;
use crate::error::Result;

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

impl Status {
    /// Full status line, without line terminator.
    pub fn status_line(self) -> &'static str {
        match self {
            Status::Ok => "HTTP/1.1 200 OK",
            Status::NotFound => "HTTP/1.1 404 NOT FOUND",
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::NotFound => 404,
        }
    }
}

/// A complete response ready to be written to a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: String,
    pub body: Arc<[u8]>,
}

impl Response {
    /// Creates a response with the given status and body.
    pub fn new(status: Status, content_type: impl Into<String>, body: Arc<[u8]>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body,
        }
    }

    /// Builds a response serving a cached document.
    pub fn from_entry(status: Status, entry: &CacheEntry) -> Self {
        Self::new(status, entry.content_type.clone(), Arc::clone(&entry.content))
    }

    /// Renders the status line and headers, including the blank line.
    pub fn head(&self, date: DateTime<Utc>) -> String {
        format!(
            "{}\r\nDate: {}\r\nConnection: close\r\nContent-Length: {}\r\nContent-Type: {}\r\n\r\n",
            self.status.status_line(),
            http_date(date),
            self.body.len(),
            self.content_type,
        )
    }

    /// Writes head and body to `writer` and flushes it.
    pub async fn write_to<W>(&self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(self.head(Utc::now()).as_bytes()).await?;
        writer.write_all(&self.body).await?;
        writer.flush().await?;
        Ok(())
    }
}

/// Formats `date` the way HTTP `Date` headers expect (IMF-fixdate).
pub fn http_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
