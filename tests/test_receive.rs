use courier::client::receive::read_response;
use courier::http::request::Request;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::time::{sleep, timeout};

fn test_request() -> Request {
    Request::new("example.com", "127.0.0.1")
}

#[tokio::test]
async fn test_response_split_mid_header() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    let writer = tokio::spawn(async move {
        server
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Le")
            .await
            .unwrap();
        sleep(Duration::from_millis(50)).await;
        server.write_all(b"ngth: 5\r\n\r\nhello").await.unwrap();
        server
    });

    let response = read_response(&mut client, &request).await.unwrap();
    writer.await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.content_length(), 5);
    assert_eq!(response.raw_body(), b"hello");
    assert_eq!(response.received(), 5);
}

#[tokio::test]
async fn test_response_in_single_read() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    server
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nServer: mock\r\n\r\nok")
        .await
        .unwrap();

    let response = read_response(&mut client, &request).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.server(), "mock");
    assert_eq!(response.raw_body(), b"ok");
    drop(server);
}

#[tokio::test]
async fn test_eof_terminates_body_without_content_length() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    server
        .write_all(b"HTTP/1.1 200 OK\r\nServer: mock\r\n\r\nabc")
        .await
        .unwrap();
    drop(server);

    let response = read_response(&mut client, &request).await.unwrap();

    assert_eq!(response.raw_body(), b"abc");
    // The wire-observed count replaces the unset declared length.
    assert_eq!(response.content_length(), 3);
    assert_eq!(response.received(), 3);
}

#[tokio::test]
async fn test_zero_bytes_received_is_a_failure() {
    let (mut client, server) = tokio::io::duplex(4096);
    let request = test_request();
    drop(server);

    let failure = read_response(&mut client, &request).await.unwrap_err();
    let cause = failure.cause.expect("failure should carry a cause");

    assert!(cause.to_string().contains("no header data received"));
}

#[tokio::test]
async fn test_eof_before_delimiter_is_a_failure() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    server.write_all(b"HTTP/1.1 200 OK\r\nPartial").await.unwrap();
    drop(server);

    let failure = read_response(&mut client, &request).await.unwrap_err();

    // Headers arrived but never completed: generic no-response failure.
    assert!(failure.cause.is_none());
}

#[tokio::test]
async fn test_content_length_zero_completes_without_blocking() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    server
        .write_all(b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n")
        .await
        .unwrap();

    // The peer stays open: completion must come from the declared length,
    // not from EOF.
    let response = timeout(Duration::from_secs(1), read_response(&mut client, &request))
        .await
        .expect("engine must not wait for more data")
        .unwrap();

    assert_eq!(response.status_code(), 204);
    assert_eq!(response.content_length(), 0);
    assert!(response.raw_body().is_empty());
    drop(server);
}

#[tokio::test]
async fn test_body_bytes_in_header_read_seed_the_counter() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    let writer = tokio::spawn(async move {
        server
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 8\r\n\r\nfour")
            .await
            .unwrap();
        sleep(Duration::from_millis(50)).await;
        server.write_all(b"more").await.unwrap();
        server
    });

    let response = read_response(&mut client, &request).await.unwrap();
    writer.await.unwrap();

    assert_eq!(response.raw_body(), b"fourmore");
    assert_eq!(response.received(), 8);
}

#[tokio::test]
async fn test_eof_short_of_declared_length_completes_with_observed() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    server
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nabc")
        .await
        .unwrap();
    drop(server);

    let response = read_response(&mut client, &request).await.unwrap();

    assert_eq!(response.raw_body(), b"abc");
    assert_eq!(response.content_length(), 3);
}

#[tokio::test]
async fn test_surplus_in_same_read_lands_in_body() {
    // Data past Content-Length that arrives in the same read is captured;
    // the observed length is what sticks.
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = test_request();

    server
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhelloEXTRA")
        .await
        .unwrap();

    let response = read_response(&mut client, &request).await.unwrap();

    assert_eq!(response.raw_body(), b"helloEXTRA");
    assert_eq!(response.content_length(), 10);
    drop(server);
}

#[tokio::test]
async fn test_read_timeout_before_headers_is_a_failure() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let mut request = test_request();
    request.set_timeout(Duration::from_millis(50));

    server.write_all(b"HTTP/1.1 200 OK\r\n").await.unwrap();

    let failure = read_response(&mut client, &request).await.unwrap_err();
    let cause = failure.cause.expect("timeout should be captured");

    assert_eq!(cause.kind(), std::io::ErrorKind::TimedOut);
    drop(server);
}

#[tokio::test]
async fn test_read_timeout_mid_body_completes_with_partial() {
    // A captured read error is reported like EOF: the response that already
    // exists completes with whatever body arrived.
    let (mut client, mut server) = tokio::io::duplex(4096);
    let mut request = test_request();
    request.set_timeout(Duration::from_millis(50));

    server
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
        .await
        .unwrap();

    let response = read_response(&mut client, &request).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.raw_body(), b"partial");
    assert_eq!(response.content_length(), 7);
    drop(server);
}
