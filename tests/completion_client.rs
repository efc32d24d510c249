use curator::completion::{
    CompletionError, CompletionRequest, CompletionService, OpenAiCompletionService,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn request() -> CompletionRequest {
    CompletionRequest::new("You are a test assistant.", "Say hi.", 0.2)
}

#[tokio::test]
async fn complete_returns_first_choice_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "hi there" } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let service = OpenAiCompletionService::new(
        Some("sk-test".to_string()),
        mock_server.uri(),
        "gpt-4o",
    );

    assert!(service.is_configured());
    let output = service.complete(request()).await.unwrap();
    assert_eq!(output, "hi there");
}

#[tokio::test]
async fn complete_sends_system_and_user_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are a test assistant." },
                { "role": "user", "content": "Say hi." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content": "ok" } } ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = OpenAiCompletionService::new(
        Some("sk-test".to_string()),
        mock_server.uri(),
        "gpt-4o",
    );
    service.complete(request()).await.unwrap();
}

#[tokio::test]
async fn api_errors_carry_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let service = OpenAiCompletionService::new(
        Some("sk-test".to_string()),
        mock_server.uri(),
        "gpt-4o",
    );

    match service.complete(request()).await {
        Err(CompletionError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limited"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_key_fails_without_calling_the_network() {
    let service = OpenAiCompletionService::new(None, "http://127.0.0.1:9", "gpt-4o");

    assert!(!service.is_configured());
    match service.complete(request()).await {
        Err(CompletionError::MissingApiKey) => {}
        other => panic!("expected missing key error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let service = OpenAiCompletionService::new(
        Some("sk-test".to_string()),
        mock_server.uri(),
        "gpt-4o",
    );

    match service.complete(request()).await {
        Err(CompletionError::EmptyResponse) => {}
        other => panic!("expected empty-response error, got {other:?}"),
    }
}
