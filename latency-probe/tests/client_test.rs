//! Gateway client classification and smoke check against a mock gateway.

use std::time::Duration;

use latency_probe::{smoke, CallError, HttpGatewayClient, InferenceClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpGatewayClient {
    HttpGatewayClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

async fn mount_health(server: &MockServer, status: &str) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": status })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_generate_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(query_param("prompt", "Hello!"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generated_text": "Hello! Nice to meet you.",
            "latency_seconds": 0.4213
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).generate("Hello!").await.unwrap();
    assert_eq!(response.generated_text, "Hello! Nice to meet you.");
    assert_eq!(response.latency_seconds, 0.4213);
}

#[tokio::test]
async fn test_generate_server_error_is_inference_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "type": "inference_failed", "message": "Inference failed: boom" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("Hello!").await.unwrap_err();
    assert_eq!(
        err,
        CallError::Inference {
            status: 500,
            message: "Inference failed: boom".to_string(),
        }
    );
}

#[tokio::test]
async fn test_generate_plain_error_body_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("Hello!").await.unwrap_err();
    assert_eq!(
        err,
        CallError::Inference {
            status: 503,
            message: "upstream unavailable".to_string(),
        }
    );
}

#[tokio::test]
async fn test_generate_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "wrong shape" })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("Hello!").await.unwrap_err();
    assert_eq!(err.kind(), "invalid_response");
}

#[tokio::test]
async fn test_generate_slow_gateway_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "generated_text": "late", "latency_seconds": 3.0 }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = HttpGatewayClient::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.generate("Hello!").await.unwrap_err();
    assert_eq!(err, CallError::Timeout(Duration::from_millis(200)));
}

#[tokio::test]
async fn test_generate_unreachable_is_transport_error() {
    let client = HttpGatewayClient::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();
    let err = client.generate("Hello!").await.unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn test_smoke_check_passes() {
    let server = MockServer::start().await;
    mount_health(&server, "ok").await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generated_text": "I'm doing well.",
            "latency_seconds": 0.12
        })))
        .mount(&server)
        .await;

    let report = smoke::run(&client_for(&server), "Hello, how are you?").await;
    assert!(report.health_passed());
    assert!(report.passed());
}

#[tokio::test]
async fn test_smoke_check_skips_generate_when_unhealthy() {
    let server = MockServer::start().await;
    mount_health(&server, "degraded").await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = smoke::run(&client_for(&server), "Hello, how are you?").await;
    assert!(!report.health_passed());
    assert!(report.generate.is_none());
    assert!(!report.passed());
}

#[tokio::test]
async fn test_smoke_check_reports_generate_failure() {
    let server = MockServer::start().await;
    mount_health(&server, "ok").await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(504).set_body_json(json!({
            "error": { "type": "timeout", "message": "Inference timed out after 120s" }
        })))
        .mount(&server)
        .await;

    let report = smoke::run(&client_for(&server), "Hello, how are you?").await;
    assert!(report.health_passed());
    assert!(matches!(
        report.generate,
        Some(Err(CallError::Inference { status: 504, .. }))
    ));
    assert!(!report.passed());
}
