//! Integration tests for POST /api/generate.
//!
//! Each test spawns the application with a recording mock provider and drives
//! it over HTTP, asserting both the relayed response and exactly what was (or
//! was not) forwarded downstream.

use relay_service::config::{CommonConfig, GeminiSettings, RelayConfig};
use relay_service::services::providers::mock::MockTextProvider;
use relay_service::services::providers::GenerationConfig;
use relay_service::startup::Application;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type RecordedCalls = Arc<Mutex<Vec<(String, GenerationConfig)>>>;

/// Spawn the application with the given mock provider; returns the base URL
/// and a handle to the provider's recorded calls.
async fn spawn_app(provider: MockTextProvider) -> (String, RecordedCalls) {
    let config = RelayConfig {
        common: CommonConfig { port: 0 },
        gemini: GeminiSettings::default(),
    };
    let calls = provider.calls();

    let app = Application::build_with_provider(config, Arc::new(provider))
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    (format!("http://localhost:{}", port), calls)
}

fn client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn valid_prompt_relays_provider_text() {
    let (base, calls) = spawn_app(MockTextProvider::replying("Hi there")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Say hi" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "text": "Hi there" }));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Say hi");
}

#[tokio::test]
async fn request_without_schema_forwards_plain_text_config() {
    let (base, calls) = spawn_app(MockTextProvider::replying("ok")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Say hi" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let calls = calls.lock().unwrap();
    let config = &calls[0].1;
    assert_eq!(config.response_mime_type, "text/plain");
    assert!(config.response_schema.is_none());
}

#[tokio::test]
async fn request_with_schema_forwards_it_unchanged() {
    let (base, calls) = spawn_app(MockTextProvider::replying("{}")).await;
    let schema = json!({
        "type": "object",
        "properties": { "title": { "type": "string" } },
        "required": ["title"]
    });

    let response = client()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Make a title", "responseSchema": schema }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let calls = calls.lock().unwrap();
    let config = &calls[0].1;
    assert_eq!(config.response_mime_type, "application/json");
    assert_eq!(config.response_schema, Some(schema));
}

#[tokio::test]
async fn empty_body_is_rejected_before_the_provider_is_called() {
    let (base, calls) = spawn_app(MockTextProvider::replying("unused")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "error": "'prompt' field is required" }));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let (base, calls) = spawn_app(MockTextProvider::replying("unused")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "error": "'prompt' field is required" }));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let (base, calls) = spawn_app(MockTextProvider::replying("unused")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .header("Content-Type", "text/plain")
        .body("just some text")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "error": "request must be JSON" }));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let (base, calls) = spawn_app(MockTextProvider::replying("unused")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "error": "request must be JSON" }));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_maps_to_500_with_the_underlying_message() {
    let (base, _calls) = spawn_app(MockTextProvider::failing("quota exceeded")).await;

    let response = client()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Say hi" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({ "error": "server error contacting AI: quota exceeded" })
    );
    assert!(body.get("text").is_none());
}
