//! Integration tests for `HttpInsightProvider` using wiremock HTTP mocks.

use std::time::Duration;

use aivis_analytics::{
    generate_or_fallback, CachingProvider, HttpInsightProvider, InsightError, InsightProvider,
    QueryCache, ResponseCache,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_provider(base_url: &str) -> HttpInsightProvider {
    HttpInsightProvider::new(base_url, "test-key", "gpt-4", 200, Duration::from_secs(5))
        .expect("client construction should not fail")
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn generate_returns_message_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4",
            "max_tokens": 200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Strong SEO.")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let text = provider
        .generate("Why is Factor popular?")
        .await
        .expect("should return completion text");

    assert_eq!(text, "Strong SEO.");
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    let provider = test_provider(&format!("{}/", server.uri()));
    assert_eq!(provider.generate("p").await.expect("should succeed"), "ok");
}

#[tokio::test]
async fn error_status_maps_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let err = provider.generate("p").await.expect_err("429 should fail");

    match err {
        InsightError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_map_to_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let err = provider.generate("p").await.expect_err("no choices should fail");
    assert!(matches!(err, InsightError::EmptyResponse));
}

#[tokio::test]
async fn server_error_falls_back_to_literal_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let text = generate_or_fallback(
        &provider,
        "p",
        Duration::from_secs(5),
        "fallback insight".to_string(),
    )
    .await;

    assert_eq!(text, "fallback insight");
}

#[tokio::test]
async fn slow_server_falls_back_after_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let text = generate_or_fallback(
        &provider,
        "p",
        Duration::from_millis(100),
        "fallback insight".to_string(),
    )
    .await;

    assert_eq!(text, "fallback insight");
}

#[tokio::test]
async fn caching_provider_hits_server_once_per_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("cached insight")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = CachingProvider::new(test_provider(&server.uri()), QueryCache::new(24), "gpt-4");
    let first = provider.generate("Best meal kits").await.expect("first call");
    let second = provider.generate("best   meal kits").await.expect("cached call");

    assert_eq!(first, "cached insight");
    assert_eq!(second, "cached insight");
    assert_eq!(provider.cache().stats().active_entries, 1);
}
