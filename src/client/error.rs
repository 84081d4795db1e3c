use std::io;
use thiserror::Error;

/// Failures surfaced by the request transport.
///
/// Parsing anomalies never show up here: malformed status lines and odd
/// header values degrade to conservative defaults inside the response
/// parser instead of erroring. Every path that produces a `TransportError`
/// leaves the connection closed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// TCP connect failed, or the request write failed even after the
    /// single reconnect-and-retry.
    #[error("connection to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The stream ended or errored before a response could be constructed.
    /// The message carries the cause followed by the outgoing request head
    /// (method, target, full header list) for diagnostics.
    #[error("{message}\r\n{request_head}")]
    Transfer {
        message: String,
        request_head: String,
        #[source]
        source: Option<io::Error>,
    },
}
