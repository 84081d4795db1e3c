use courier::http::request::{DEFAULT_TIMEOUT, Request, RequestBuilder};
use std::time::Duration;

#[test]
fn test_request_defaults() {
    let request = Request::new("example.com", "93.184.216.34");

    assert_eq!(request.method(), "GET");
    assert_eq!(request.domain(), "example.com");
    assert_eq!(request.ip(), "93.184.216.34");
    assert_eq!(request.port(), 80);
    assert_eq!(request.path(), "/");
    assert_eq!(request.charset(), "us-ascii");
    assert_eq!(request.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_request_default_headers() {
    let request = Request::new("example.com", "93.184.216.34");
    let headers = request.headers();

    assert_eq!(headers.get("Connection"), Some("Keep-Alive"));
    assert_eq!(headers.get("Accept"), Some("*/*"));
    assert_eq!(headers.get("Accept-Language"), Some("en-us"));
    assert_eq!(headers.get("Accept-Encoding"), Some("gzip, deflate"));
    assert!(headers.contains("User-Agent"));
}

#[test]
fn test_set_method_normalizes_uppercase() {
    let mut request = Request::new("example.com", "93.184.216.34");

    request.set_method("post");
    assert_eq!(request.method(), "POST");

    request.set_method("Delete");
    assert_eq!(request.method(), "DELETE");
}

#[test]
fn test_builder_full_configuration() {
    let request = RequestBuilder::new()
        .domain("example.com")
        .ip("10.0.0.1")
        .port(8080)
        .method("put")
        .path("/things/1")
        .charset("utf-8")
        .timeout(Duration::from_secs(3))
        .header("X-Trace", "abc123")
        .build()
        .unwrap();

    assert_eq!(request.method(), "PUT");
    assert_eq!(request.domain(), "example.com");
    assert_eq!(request.ip(), "10.0.0.1");
    assert_eq!(request.port(), 8080);
    assert_eq!(request.path(), "/things/1");
    assert_eq!(request.charset(), "utf-8");
    assert_eq!(request.timeout(), Duration::from_secs(3));
    assert_eq!(request.headers().get("X-Trace"), Some("abc123"));
}

#[test]
fn test_builder_header_overrides_default() {
    let request = RequestBuilder::new()
        .domain("example.com")
        .ip("10.0.0.1")
        .header("User-Agent", "custom/2.0")
        .build()
        .unwrap();

    assert_eq!(request.headers().get("User-Agent"), Some("custom/2.0"));
}

#[test]
fn test_builder_missing_domain() {
    let result = RequestBuilder::new().ip("10.0.0.1").build();
    assert_eq!(result.err(), Some("domain missing"));
}

#[test]
fn test_builder_missing_ip() {
    let result = RequestBuilder::new().domain("example.com").build();
    assert_eq!(result.err(), Some("ip missing"));
}

#[test]
fn test_headers_mutable_until_send() {
    let mut request = Request::new("example.com", "10.0.0.1");
    request.headers_mut().set("X-Extra", "1");
    request.headers_mut().remove("Accept-Language");

    assert_eq!(request.headers().get("X-Extra"), Some("1"));
    assert_eq!(request.headers().get("Accept-Language"), None);
}
