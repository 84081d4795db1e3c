use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::scan::{HEADER_DELIMITER, find_bytes};

/// Bytes pulled from the stream per iteration.
const CHUNK_SIZE: usize = 1024;

enum ReceiveState {
    AwaitingHeaders,
    ReceivingBody,
}

/// The stream ended or errored before a complete header block arrived, so
/// no response could be constructed. The transport wraps this with the
/// outgoing request head for diagnostics.
#[derive(Debug)]
pub struct ReceiveFailure {
    pub cause: Option<io::Error>,
}

/// Reads one HTTP response from `stream`.
///
/// Accumulates reads until the `\r\n\r\n` delimiter is located (the search
/// re-runs over the whole growing buffer), parses the header block, then
/// accumulates body bytes until a known `Content-Length` is covered or the
/// peer closes the stream. Each read runs under the request's timeout;
/// expiry and read errors are captured rather than propagated mid-loop.
/// If headers were already parsed, the partial body still completes the
/// response; otherwise the failure is reported.
///
/// On completion the observed body length overwrites the declared
/// `Content-Length`. Bytes past a covered `Content-Length` stay unread on
/// the socket; the transport closes the connection right after, so they are
/// discarded with it.
pub async fn read_response<S>(stream: &mut S, request: &Request) -> Result<Response, ReceiveFailure>
where
    S: AsyncRead + Unpin,
{
    let deadline = request.timeout();
    let mut state = ReceiveState::AwaitingHeaders;
    let mut head_buf = BytesMut::with_capacity(CHUNK_SIZE);
    let mut body_buf = BytesMut::new();
    let mut response: Option<Response> = None;
    let mut read_error: Option<io::Error> = None;
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let n = match timeout(deadline, stream.read(&mut chunk)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                read_error = Some(e);
                break;
            }
            Err(_) => {
                read_error = Some(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
                break;
            }
        };

        if n == 0 {
            // EOF doubles as the body terminator once headers are in.
            if response.is_none() && head_buf.is_empty() {
                read_error = Some(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "no header data received",
                ));
            }
            break;
        }

        match state {
            ReceiveState::AwaitingHeaders => {
                head_buf.extend_from_slice(&chunk[..n]);
                if let Some(idx) = find_bytes(&head_buf, HEADER_DELIMITER, 0) {
                    let mut parsed = Response::parse(request, &head_buf[..idx]);
                    // Whatever followed the delimiter in this same read is
                    // already body.
                    body_buf.extend_from_slice(&head_buf[idx + HEADER_DELIMITER.len()..]);
                    parsed.add_received(body_buf.len());
                    tracing::trace!(
                        status = parsed.status_code(),
                        content_length = parsed.content_length(),
                        seeded = body_buf.len(),
                        "response headers parsed"
                    );
                    response = Some(parsed);
                    state = ReceiveState::ReceivingBody;
                }
            }
            ReceiveState::ReceivingBody => {
                body_buf.extend_from_slice(&chunk[..n]);
                if let Some(resp) = response.as_mut() {
                    resp.add_received(n);
                }
            }
        }

        if let Some(resp) = &response {
            let declared = resp.content_length();
            if declared >= 0 && body_buf.len() as i64 >= declared {
                break;
            }
        }
    }

    match response {
        Some(mut resp) => {
            resp.set_body(body_buf.to_vec());
            Ok(resp)
        }
        None => Err(ReceiveFailure { cause: read_error }),
    }
}
