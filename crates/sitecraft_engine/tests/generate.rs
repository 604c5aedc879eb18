use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use sitecraft_engine::{
    DeviceMode, FailureKind, GenerateRequest, GenerateSettings, Generator, ReqwestGenerator,
    GENERATE_PATH,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator_for(server: &MockServer) -> ReqwestGenerator {
    ReqwestGenerator::new(GenerateSettings {
        base_url: server.uri(),
        ..GenerateSettings::default()
    })
    .expect("client")
}

fn portfolio_request() -> GenerateRequest {
    GenerateRequest {
        prompt: "a portfolio site".to_string(),
        device_mode: DeviceMode::Desktop,
    }
}

#[tokio::test]
async fn posts_prompt_and_returns_nested_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "prompt": "a portfolio site",
            "deviceMode": "desktop"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "design": { "html": "<html>OK</html>" } } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let html = generator_for(&server)
        .generate(&portfolio_request())
        .await
        .expect("generate ok");
    assert_eq!(html, "<html>OK</html>");
}

#[test]
fn serializes_every_device_mode_in_lowercase() {
    for (mode, wire) in [
        (DeviceMode::Mobile, "mobile"),
        (DeviceMode::Tablet, "tablet"),
        (DeviceMode::Desktop, "desktop"),
    ] {
        let request = GenerateRequest {
            prompt: "p".to_string(),
            device_mode: mode,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "prompt": "p", "deviceMode": wire })
        );
    }
}

#[tokio::test]
async fn non_success_status_is_a_failure_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&portfolio_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(
        err.message,
        "Failed to generate design (HTTP 500 Internal Server Error)"
    );
}

#[tokio::test]
async fn server_error_message_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "message": "Rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&portfolio_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(429));
    assert_eq!(err.to_string(), "Rate limit exceeded");
}

#[tokio::test]
async fn body_without_html_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "design": {} } })))
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&portfolio_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
    assert!(err.message.contains("data.design.html"));
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let generator = ReqwestGenerator::new(GenerateSettings {
        base_url,
        ..GenerateSettings::default()
    })
    .expect("client");
    let err = generator.generate(&portfolio_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn configured_timeout_is_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "data": { "design": { "html": "<p>late</p>" } } })),
        )
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(GenerateSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..GenerateSettings::default()
    })
    .expect("client");
    let err = generator.generate(&portfolio_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(GenerateSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..GenerateSettings::default()
    })
    .expect("client");
    let err = generator.generate(&portfolio_request()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn oversized_error_body_still_reports_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html>bad gateway, very long</html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(GenerateSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..GenerateSettings::default()
    })
    .expect("client");
    let err = generator.generate(&portfolio_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.message, "Failed to generate design (HTTP 502 Bad Gateway)");
}
