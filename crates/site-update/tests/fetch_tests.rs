//! Behavior tests for the release fetcher
//!
//! Uses wiremock for status and body behavior; the timeout test shortens
//! the client timeout rather than waiting out the real 10 seconds.

mod common;

use std::time::Duration;

use site_update::{UpdateClient, UpdateError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_text_returns_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version/stable"))
        .respond_with(ResponseTemplate::new(200).set_body_string("20230101120000\n"))
        .mount(&server)
        .await;

    let client = UpdateClient::new().unwrap();
    let response = client
        .fetch_text(&format!("{}/version/stable", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "20230101120000\n");
}

#[tokio::test]
async fn fetch_text_fails_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version/stable"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = UpdateClient::new().unwrap();
    let err = client
        .fetch_text(&format!("{}/version/stable", server.uri()))
        .await
        .unwrap_err();

    match err {
        UpdateError::UnexpectedStatus { code, .. } => assert_eq!(code, 404),
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_text_rejects_non_200_success_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version/stable"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = UpdateClient::new().unwrap();
    let err = client
        .fetch_text(&format!("{}/version/stable", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::UnexpectedStatus { code: 204, .. }
    ));
}

#[tokio::test]
async fn fetch_text_aborts_on_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version/stable"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("20230101120000")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = UpdateClient::new()
        .unwrap()
        .with_timeout(Duration::from_millis(150));

    let err = client
        .fetch_text(&format!("{}/version/stable", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::Timeout { .. }));
}

#[tokio::test]
async fn fetch_text_classifies_connection_refused() {
    // Bind then drop a listener so the port is very likely unoccupied.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = UpdateClient::new().unwrap();
    let err = client
        .fetch_text(&format!("http://127.0.0.1:{}/version/stable", port))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::ConnectionRefused { .. }));
}

#[tokio::test]
async fn fetch_binary_returns_exact_bytes() {
    let payload: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/binaries/stable/linux/20230101120000.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let client = UpdateClient::new().unwrap();
    let body = client
        .fetch_binary(&format!(
            "{}/binaries/stable/linux/20230101120000.tar.gz",
            server.uri()
        ))
        .await
        .unwrap();

    assert_eq!(body, payload);
}

#[tokio::test]
async fn fetch_binary_fails_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/binaries/stable/linux/missing.tar.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = UpdateClient::new().unwrap();
    let err = client
        .fetch_binary(&format!(
            "{}/binaries/stable/linux/missing.tar.gz",
            server.uri()
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::UnexpectedStatus { code: 404, .. }
    ));
}
