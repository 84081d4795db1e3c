use crate::http::headers::HeaderMap;
use std::time::Duration;

/// Read deadline applied while receiving the response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

pub const DEFAULT_USER_AGENT: &str = "courier/0.1";
pub const DEFAULT_CHARSET: &str = "us-ascii";

/// A configurable HTTP request.
///
/// Mutable until handed to [`Transport::send`]: the transport rewrites the
/// `Content-Length`, `Content-Type` and `Host` headers at send time, so
/// user-set values for those keys are never authoritative.
///
/// [`Transport::send`]: crate::client::transport::Transport::send
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    domain: String,
    ip: String,
    port: u16,
    path: String,
    charset: String,
    timeout: Duration,
    headers: HeaderMap,
}

impl Request {
    /// Creates a GET request for `/` against the given host.
    ///
    /// `domain` becomes the `Host` header; `ip` is the address the transport
    /// actually connects to, resolution being the caller's job. The default
    /// header set advertises gzip/deflate support.
    pub fn new(domain: impl Into<String>, ip: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.set("Connection", "Keep-Alive");
        headers.set("Accept", "*/*");
        headers.set("User-Agent", DEFAULT_USER_AGENT);
        headers.set("Accept-Language", "en-us");
        headers.set("Accept-Encoding", "gzip, deflate");

        Self {
            method: "GET".to_string(),
            domain: domain.into(),
            ip: ip.into(),
            port: 80,
            path: "/".to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Sets the method, normalized to uppercase.
    pub fn set_method(&mut self, method: &str) {
        self.method = method.to_ascii_uppercase();
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn set_ip(&mut self, ip: impl Into<String>) {
        self.ip = ip.into();
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.charset = charset.into();
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// Builder for constructing [`Request`] objects in a fluent style.
///
/// # Example
///
/// ```ignore
/// let request = RequestBuilder::new()
///     .domain("example.com")
///     .ip("93.184.216.34")
///     .method("POST")
///     .path("/submit")
///     .build()?;
/// ```
pub struct RequestBuilder {
    domain: Option<String>,
    ip: Option<String>,
    port: u16,
    method: String,
    path: String,
    charset: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            domain: None,
            ip: None,
            port: 80,
            method: "GET".to_string(),
            path: "/".to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header on top of the default set.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let mut request = Request::new(
            self.domain.ok_or("domain missing")?,
            self.ip.ok_or("ip missing")?,
        );
        request.set_method(&self.method);
        request.set_port(self.port);
        request.set_path(self.path);
        request.set_charset(self.charset);
        request.set_timeout(self.timeout);
        for (name, value) in self.headers {
            request.headers_mut().set(name, value);
        }
        Ok(request)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
