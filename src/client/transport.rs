//! Request transport: connection lifecycle and wire encoding.

use std::io;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::client::error::TransportError;
use crate::client::receive::{self, ReceiveFailure};
use crate::http::encode_ascii;
use crate::http::request::Request;
use crate::http::response::Response;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns one TCP connection and pushes requests through it.
///
/// At most one live connection exists per transport, and every receive,
/// successful or not, closes it: there is no reuse or pipelining across
/// response cycles. One `send` occupies the caller for its whole
/// connect/write/read/parse lifecycle, and the `&mut self` receiver rules
/// out concurrent use of a single instance.
pub struct Transport {
    connect_timeout: Duration,
    connection: Option<TcpStream>,
    remote: Option<String>,
}

impl Transport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            connection: None,
            remote: None,
        }
    }

    /// Sends `body` with the request's current configuration and reads the
    /// response.
    ///
    /// Rewrites the request's `Content-Length`, `Content-Type` and `Host`
    /// headers as a side effect (see [`encode_request`]), establishes or
    /// re-establishes the connection as needed, and retries a failed write
    /// exactly once on a fresh connection before giving up.
    pub async fn send(
        &mut self,
        request: &mut Request,
        body: &str,
    ) -> Result<Response, TransportError> {
        let wire = encode_request(request, body);

        tracing::debug!(
            method = %request.method(),
            host = %request.domain(),
            path = %request.path(),
            bytes = wire.len(),
            "sending request"
        );

        self.establish(request).await?;

        if let Err(first) = self.write(&wire).await {
            tracing::warn!(error = %first, "request write failed, reconnecting once");
            self.close();
            self.connect(request).await?;
            if let Err(second) = self.write(&wire).await {
                self.close();
                return Err(TransportError::Connect {
                    addr: connect_addr(request),
                    source: second,
                });
            }
        }

        let result = match self.connection.as_mut() {
            Some(stream) => receive::read_response(stream, request).await,
            None => Err(ReceiveFailure { cause: None }),
        };

        // One connection per response cycle, no matter how it ended.
        self.close();

        match result {
            Ok(response) => {
                tracing::debug!(
                    status = response.status_code(),
                    content_length = response.content_length(),
                    "response complete"
                );
                Ok(response)
            }
            Err(failure) => Err(transfer_error(request, failure)),
        }
    }

    /// Drops the connection, releasing stream and socket.
    pub fn close(&mut self) {
        self.connection = None;
        self.remote = None;
    }

    // Reuses the live connection only when it targets the same remote;
    // otherwise closes it and opens a fresh one.
    async fn establish(&mut self, request: &Request) -> Result<(), TransportError> {
        if self.connection.is_none() || self.remote.as_deref() != Some(request.ip()) {
            self.close();
            self.connect(request).await?;
        }
        Ok(())
    }

    async fn connect(&mut self, request: &Request) -> Result<(), TransportError> {
        let addr = connect_addr(request);
        let stream = timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| TransportError::Connect {
                addr: addr.clone(),
                source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
            })?
            .map_err(|e| TransportError::Connect {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::trace!(addr = %addr, "connected");
        self.remote = Some(request.ip().to_string());
        self.connection = Some(stream);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.connection.as_mut() {
            Some(stream) => {
                stream.write_all(bytes).await?;
                stream.flush().await
            }
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "no connection")),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

/// Applies the send-time header policy and serializes the wire request,
/// encoded one byte per character.
///
/// `Content-Length` is present only for a non-empty body on a POST
/// (case-insensitive) and counts the body bytes before the trailing
/// `\r\n\r\n` sentinel that is appended in that same case. A missing
/// `Content-Type` defaults to form-urlencoded with the request charset; an
/// existing one that does not mention `multipart/form-data` gets the
/// form-urlencoded and/or `charset=` fragments appended when absent, as an
/// additive merge rather than a rewrite. `Host` is always forced to the
/// domain.
///
/// Public so integration tests can assert on the exact bytes.
pub fn encode_request(request: &mut Request, body: &str) -> Vec<u8> {
    request.headers_mut().remove("Content-Length");

    let mut wire_body = body.to_string();
    if !body.is_empty() && request.method().eq_ignore_ascii_case("POST") {
        let length = encode_ascii(body).len();
        request
            .headers_mut()
            .set("Content-Length", length.to_string());

        let charset = request.charset().to_string();
        let existing = request
            .headers()
            .get("Content-Type")
            .unwrap_or("")
            .to_string();
        if existing.is_empty() {
            request.headers_mut().set(
                "Content-Type",
                format!("application/x-www-form-urlencoded; charset={charset}"),
            );
        } else if !existing.contains("multipart/form-data") {
            let mut merged = existing;
            if !merged.contains("application/x-www-form-urlencoded") {
                merged.push_str("; application/x-www-form-urlencoded");
            }
            if !merged.contains("charset=") {
                merged.push_str(&format!("; charset={charset}"));
            }
            request.headers_mut().set("Content-Type", merged);
        }

        wire_body.push_str("\r\n\r\n");
    }

    let host = request.domain().to_string();
    request.headers_mut().set("Host", host);

    let mut text = format!("{} {} HTTP/1.1\r\n", request.method(), request.path());
    for (name, value) in request.headers().iter() {
        text.push_str(name);
        text.push_str(": ");
        text.push_str(value);
        text.push_str("\r\n");
    }
    text.push_str("\r\n");
    text.push_str(&wire_body);

    encode_ascii(&text)
}

/// Serialized request head used in transfer-failure diagnostics: the
/// request line against the target IP, then every header.
pub fn request_head(request: &Request) -> String {
    let mut lines = vec![format!("{} {} HTTP/1.1", request.method(), request.ip())];
    for (name, value) in request.headers().iter() {
        lines.push(format!("{name}: {value}"));
    }
    lines.join("\r\n")
}

fn transfer_error(request: &Request, failure: ReceiveFailure) -> TransportError {
    let message = match &failure.cause {
        Some(e) => e.to_string(),
        None => "no response received".to_string(),
    };
    TransportError::Transfer {
        message,
        request_head: request_head(request),
        source: failure.cause,
    }
}

fn connect_addr(request: &Request) -> String {
    format!("{}:{}", request.ip(), request.port())
}
