//! Retry and failure classification of the HTTP transport against a
//! scripted mock server.

mod common;

use common::{environment, environment_list, test_config, transport, BASIC_AUTH_HEADER};
use confluent_cloud::client::{Method, Transport};
use confluent_cloud::error::{Error, ErrorKind, HttpErrorKind};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENVIRONMENTS: &str = "/org/v2/environments";

#[tokio::test]
async fn test_get_retries_503_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(environment_list(json!([environment(
                "env-a1", "prod"
            )]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 5));
    let body = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap();

    assert_eq!(body["kind"], "EnvironmentList");
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_get_exhausts_retries_on_persistent_503() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 2));
    let err = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(503));
    assert_eq!(err.attempts, 3);
    assert_eq!(err.body, "upstream unavailable");

    let classified = Error::from_http(err);
    assert_eq!(classified.kind(), ErrorKind::Server);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENVIRONMENTS))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"errors": [{"detail": "display_name is required"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 5));
    let err = transport
        .request(Method::Post, ENVIRONMENTS, Some(&json!({})))
        .await
        .unwrap_err();

    assert_eq!(err.kind, HttpErrorKind::ClientError);
    assert_eq!(err.attempts, 1);
    assert!(err.body.contains("display_name is required"));
    assert_eq!(Error::from_http(err).kind(), ErrorKind::Client);
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid API key"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 5));
    let err = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap_err();

    assert_eq!(Error::from_http(err).kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(environment_list(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 1));
    let body = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap();

    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_post_timeout_is_unknown_outcome_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENVIRONMENTS))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(environment("env-slow", "slow"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 5).with_timeout(Duration::from_millis(200));
    let transport = transport(config);
    let err = transport
        .request(
            Method::Post,
            ENVIRONMENTS,
            Some(&json!({"display_name": "slow"})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, HttpErrorKind::Timeout);
    assert_eq!(err.attempts, 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(Error::from_http(err).kind(), ErrorKind::UnknownOutcome);
}

#[tokio::test]
async fn test_get_timeout_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(environment_list(json!([])))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 1).with_timeout(Duration::from_millis(200));
    let transport = transport(config);
    let err = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 2);
    assert_eq!(Error::from_http(err).kind(), ErrorKind::TransientNetwork);
}

#[tokio::test]
async fn test_requests_carry_basic_auth_and_json_accept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .and(header("Authorization", BASIC_AUTH_HEADER))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(environment_list(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 0));
    assert!(transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/org/v2/environments/env-a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 0));
    let body = transport
        .request(Method::Delete, "/org/v2/environments/env-a1", None)
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_undecodable_success_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(test_config(&server.uri(), 3));
    let err = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, HttpErrorKind::Decode);
    assert_eq!(err.attempts, 1);
    assert!(err.body.contains("maintenance"));

    let classified = Error::from_http(err);
    assert_eq!(classified.kind(), ErrorKind::InvalidResponse);
    assert!(classified.to_string().contains("<html>maintenance</html>"));
}

#[tokio::test]
async fn test_retry_after_is_capped_by_retry_max_delay() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENVIRONMENTS))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3600"))
        .expect(3)
        .mount(&server)
        .await;

    // retry_max_delay is 20ms in the test config
    let transport = transport(test_config(&server.uri(), 2));
    let started = Instant::now();
    let err = transport
        .request(Method::Get, ENVIRONMENTS, None)
        .await
        .unwrap_err();

    assert!(
        started.elapsed() < Duration::from_secs(5),
        "Retry-After must not exceed retry_max_delay, took {:?}",
        started.elapsed()
    );
    assert_eq!(err.status, Some(429));
    assert_eq!(err.attempts, 3);
    assert_eq!(Error::from_http(err).kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn test_refused_connection_is_retried_even_for_post() {
    // Bind then drop a listener so the port is closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let transport = transport(test_config(&format!("http://127.0.0.1:{port}"), 2));
    let err = transport
        .request(
            Method::Post,
            ENVIRONMENTS,
            Some(&json!({"display_name": "unreachable"})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, HttpErrorKind::ConnectionError);
    assert_eq!(err.attempts, 3);
    assert!(!err.is_outcome_unknown());
    assert_eq!(Error::from_http(err).kind(), ErrorKind::TransientNetwork);
}
