//! HttpCaller behavior against a live mock server and against dead endpoints.

use std::collections::HashMap;
use std::time::Duration;

use psp_smoke::{CallerOptions, HttpCaller};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn caller() -> HttpCaller {
    HttpCaller::new(CallerOptions::default()).unwrap()
}

#[tokio::test]
async fn transport_failure_is_captured_not_raised() {
    // Port 1 is never listening; the connection is refused immediately.
    let outcome = caller()
        .call(
            "POST",
            "http://127.0.0.1:1/auth/login",
            &HashMap::new(),
            Some(&json!({"email": "a@b.c", "password": "x"})),
            Duration::from_secs(1),
        )
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, None);
    assert!(outcome.error.is_some());
}

#[tokio::test]
async fn any_received_status_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let outcome = caller()
        .call(
            "POST",
            &format!("{}/auth/login", server.uri()),
            &HashMap::new(),
            Some(&json!({"email": "a@b.c", "password": "x"})),
            Duration::from_secs(2),
        )
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.status, Some(500));
    assert_eq!(outcome.body, Some(json!({"error": "boom"})));
}

#[tokio::test]
async fn non_json_body_falls_back_to_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Healthy"))
        .mount(&server)
        .await;

    let outcome = caller()
        .call(
            "GET",
            &format!("{}/health", server.uri()),
            &HashMap::new(),
            None,
            Duration::from_secs(2),
        )
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.body, Some(Value::String("Healthy".to_string())));
}

#[tokio::test]
async fn empty_body_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/companies/c-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let outcome = caller()
        .call(
            "DELETE",
            &format!("{}/admin/companies/c-1", server.uri()),
            &HashMap::new(),
            None,
            Duration::from_secs(2),
        )
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.status, Some(204));
    assert_eq!(outcome.body, None);
}

#[tokio::test]
async fn identical_calls_produce_equal_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api-keys/authenticate"))
        .and(body_json(json!({"publicKey": "pk-1", "secretKey": "sk-1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "tok-K", "scopes": ["companies"]})),
        )
        .mount(&server)
        .await;

    let url = format!("{}/api-keys/authenticate", server.uri());
    let body = json!({"publicKey": "pk-1", "secretKey": "sk-1"});
    let caller = caller();

    let first = caller
        .call("POST", &url, &HashMap::new(), Some(&body), Duration::from_secs(2))
        .await;
    let second = caller
        .call("POST", &url, &HashMap::new(), Some(&body), Duration::from_secs(2))
        .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn default_headers_are_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("X-Request-Source", "smoke"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = CallerOptions::default();
    options
        .headers
        .insert("X-Request-Source".to_string(), "smoke".to_string());
    let caller = HttpCaller::new(options).unwrap();

    let outcome = caller
        .call(
            "GET",
            &format!("{}/health", server.uri()),
            &HashMap::new(),
            None,
            Duration::from_secs(2),
        )
        .await;

    assert!(outcome.success);
}

#[tokio::test]
async fn per_call_timeout_becomes_failed_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let outcome = caller()
        .call(
            "GET",
            &format!("{}/slow", server.uri()),
            &HashMap::new(),
            None,
            Duration::from_millis(200),
        )
        .await;

    assert!(!outcome.success);
    assert!(outcome.error.is_some());
}
