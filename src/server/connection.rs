//! Single-connection handling.
//!
//! Reads the request head (plus any declared body, so the peer is not reset
//! by unread data), dispatches it and writes the response.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::api::{handle_request, ServerContext};
use crate::error::Result;

const READ_CHUNK: usize = 4096;

/// Reads one request from `reader`, at most `max_size` bytes.
///
/// Stops as soon as a complete request line has arrived with nothing after
/// it, at the end of the headers plus `Content-Length` body bytes, at EOF,
/// or at the size limit, whichever comes first.
pub async fn read_request<R>(reader: &mut R, max_size: usize) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        if let Some(head_len) = header_end(&buf) {
            let wanted = head_len.saturating_add(content_length(&buf[..head_len]));
            if buf.len() >= wanted.min(max_size) {
                break;
            }
        } else if first_line_end(&buf) == Some(buf.len()) {
            break;
        }
        if buf.len() >= max_size {
            break;
        }

        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    buf.truncate(max_size);
    Ok(buf)
}

/// Serves exactly one request on `stream`, then shuts down its write side.
pub async fn handle_connection<S>(
    stream: &mut S,
    ctx: &mut ServerContext,
    max_request_size: usize,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let raw = read_request(stream, max_request_size).await?;
    debug!(bytes = raw.len(), "Request received");

    let response = handle_request(ctx, &raw).await;
    response.write_to(stream).await?;
    stream.shutdown().await?;

    debug!(
        status = response.status.code(),
        bytes = response.body.len(),
        "Response sent"
    );
    Ok(())
}

/// Length of the first line including its `\n`.
fn first_line_end(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n').map(|i| i + 1)
}

/// Length of the header block including its terminating blank line.
///
/// Headers are only scanned so a declared body can be drained before the
/// connection closes; nothing else about them is interpreted.
fn header_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4);
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|i| i + 2);
    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Declared body length from a `Content-Length` header, 0 if absent.
///
/// Used only to drain a POST body; no other header is looked at.
fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
