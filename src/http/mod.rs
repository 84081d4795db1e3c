//! HTTP protocol types.
//!
//! This module holds the protocol-level pieces shared by the client:
//!
//! - **`headers`**: case-insensitive header map used by request and response
//! - **`scan`**: byte pattern search used to locate the header delimiter
//! - **`request`**: request representation and builder
//! - **`response`**: response representation and permissive header parser
//! - **`encoding`**: gzip/deflate body codecs
//!
//! The wire format is framed as single-byte-per-character text: the request
//! head and body are encoded with [`encode_ascii`] before hitting the
//! socket, and the response header block is decoded with [`decode_ascii`]
//! once the `\r\n\r\n` delimiter has been found.

pub mod encoding;
pub mod headers;
pub mod request;
pub mod response;
pub mod scan;

/// Encodes text one byte per character; characters outside ASCII become `?`.
pub fn encode_ascii(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// Decodes single-byte-per-character text; bytes above 0x7F become `?`.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}
