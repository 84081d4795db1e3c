use crate::http::decode_ascii;
use crate::http::encoding;
use crate::http::headers::HeaderMap;
use crate::http::request::Request;

/// Charsets this client can actually decode; a `charset=` parameter naming
/// anything else is ignored.
const SUPPORTED_CHARSETS: &[&str] = &[
    "us-ascii",
    "ascii",
    "utf-8",
    "utf8",
    "iso-8859-1",
    "latin1",
    "windows-1252",
];

/// A parsed HTTP response.
///
/// Constructed by the receive engine the moment the `\r\n\r\n` delimiter is
/// located in the stream; before that, no `Response` exists. Populated
/// progressively while body bytes stream in, finalized by [`set_body`],
/// immutable thereafter.
///
/// Parsing is permissive by contract: malformed status lines leave
/// [`status_code`] at 0, an unparseable `Content-Length` stays at −1, and
/// header anomalies never produce an error.
///
/// [`set_body`]: Response::set_body
/// [`status_code`]: Response::status_code
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status_code: u16,
    content_length: i64,
    content_type: String,
    charset: String,
    content_encoding: String,
    server: String,
    headers: HeaderMap,
    body: Vec<u8>,
    received: usize,
}

impl Response {
    /// Parses the raw header block located by the receive engine.
    ///
    /// `request` supplies the initial charset, which a recognized
    /// `charset=` parameter on `Content-Type` may override.
    pub fn parse(request: &Request, head_bytes: &[u8]) -> Self {
        let mut response = Self {
            status_code: 0,
            content_length: -1,
            content_type: String::new(),
            charset: request.charset().to_string(),
            content_encoding: String::new(),
            server: String::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            received: 0,
        };

        let text = decode_ascii(head_bytes);
        let head = text.trim();
        let rest = response.parse_status_line(head);
        response.parse_header_lines(rest);
        response
    }

    // Splits on the first space to drop the HTTP version token, on the next
    // space to take the numeric status, then skips through the first CRLF.
    // A line with no space at all leaves the status at 0 and falls through
    // to whatever text remains.
    fn parse_status_line<'a>(&mut self, head: &'a str) -> &'a str {
        let mut rest = head;
        if let Some(idx) = rest.find(' ') {
            rest = &rest[idx + 1..];
            if let Some(idx) = rest.find(' ') {
                self.status_code = rest[..idx].trim().parse().unwrap_or(0);
                rest = &rest[idx + 1..];
            }
            if let Some(idx) = rest.find("\r\n") {
                rest = &rest[idx + 2..];
            }
        }
        rest
    }

    fn parse_header_lines(&mut self, text: &str) {
        for line in text.split("\r\n") {
            if line.is_empty() {
                continue;
            }
            // Lines without a colon are silently ignored.
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            self.dispatch_header(name.trim(), value.trim());
        }
    }

    fn dispatch_header(&mut self, name: &str, value: &str) {
        match name.to_ascii_lowercase().as_str() {
            "content-length" => self.content_length = value.parse().unwrap_or(-1),
            "content-type" => {
                self.content_type = value.to_string();
                self.adopt_charset(value);
            }
            "server" => self.server = value.to_string(),
            "content-encoding" => self.content_encoding = value.to_string(),
            _ => self.headers.set(name, value),
        }
    }

    // Adopts a `charset=` parameter when it names an encoding this client
    // can decode; unrecognized charsets are ignored, not errors.
    fn adopt_charset(&mut self, content_type: &str) {
        let lower = content_type.to_ascii_lowercase();
        let Some(idx) = lower.find("charset=") else {
            return;
        };
        let tail = &content_type[idx + "charset=".len()..];
        let charset = tail.split(';').next().unwrap_or("").trim();
        if charset.eq_ignore_ascii_case(&self.charset) {
            return;
        }
        if SUPPORTED_CHARSETS
            .iter()
            .any(|known| charset.eq_ignore_ascii_case(known))
        {
            self.charset = charset.to_string();
        } else {
            tracing::debug!(charset = %charset, "ignoring unrecognized charset");
        }
    }

    /// Hands the response its completed body. The byte count observed on
    /// the wire overwrites any header-declared `Content-Length`.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.content_length = body.len() as i64;
        self.body = body;
    }

    pub(crate) fn add_received(&mut self, n: usize) {
        self.received += n;
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Declared body length, −1 until known; after [`set_body`] this is the
    /// exact length received.
    ///
    /// [`set_body`]: Response::set_body
    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn content_encoding(&self) -> &str {
        &self.content_encoding
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn transfer_encoding(&self) -> Option<&str> {
        self.headers.get("Transfer-Encoding")
    }

    /// Headers other than the specially dispatched
    /// `Content-Length`/`Content-Type`/`Server`/`Content-Encoding`.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Count of body bytes seen on the wire so far.
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Body after reversing any `Content-Encoding`.
    ///
    /// `gzip` and `deflate` are decompressed; anything else passes through.
    /// A failed decode degrades to the raw bytes instead of erroring.
    pub fn decoded_body(&self) -> Vec<u8> {
        match self.content_encoding.to_ascii_lowercase().as_str() {
            "gzip" => match encoding::gzip_decompress(&self.body) {
                Ok(out) => out,
                Err(e) => {
                    tracing::warn!(error = %e, "gzip decode failed, returning raw body");
                    self.body.clone()
                }
            },
            "deflate" => match encoding::deflate_decompress(&self.body) {
                Ok(out) => out,
                Err(e) => {
                    tracing::warn!(error = %e, "deflate decode failed, returning raw body");
                    self.body.clone()
                }
            },
            _ => self.body.clone(),
        }
    }

    /// Raw body decoded as single-byte text.
    pub fn text(&self) -> String {
        decode_ascii(&self.body)
    }
}
