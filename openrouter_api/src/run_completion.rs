use http::header::{AUTHORIZATION, CONTENT_TYPE};
use text_completion::{CompletionError, CompletionRequest};
use tracing::*;

use crate::models::{ChatCompletionBody, ChatCompletionResponse};
use crate::OpenRouterHandler;

const HTTP_REFERER: &str = "HTTP-Referer";
const X_TITLE: &str = "X-Title";

/// One POST to the chat completions endpoint.
///
/// Transport failures and non-2xx statuses are `Network` errors; a body that
/// does not carry `choices[0].message.content` is `Unexpected`.
pub async fn run_completion(
    handler: &OpenRouterHandler,
    req: &CompletionRequest,
) -> Result<String, CompletionError> {
    trace!(
        "run_completion model={} temperature={} messages={}",
        req.model,
        req.temperature,
        req.messages.len()
    );

    let body = ChatCompletionBody {
        model: &req.model,
        messages: &req.messages,
        temperature: req.temperature,
    };

    let resp = handler
        .client
        .post(&handler.endpoint)
        .header(AUTHORIZATION, format!("Bearer {}", req.api_key.expose()))
        .header(CONTENT_TYPE, "application/json")
        .header(HTTP_REFERER, &handler.referer)
        .header(X_TITLE, &handler.title)
        .timeout(req.timeout)
        .json(&body)
        .send()
        .await
        .map_err(|e| CompletionError::Network(e.to_string()))?;

    trace!("POST {} {:?}", handler.endpoint, resp.status());

    let status = resp.status();
    if !status.is_success() {
        let err_text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(CompletionError::Network(format!(
            "HTTP {}: {}",
            status, err_text
        )));
    }

    //read the body first so a dropped connection stays a network error
    let raw = resp
        .text()
        .await
        .map_err(|e| CompletionError::Network(e.to_string()))?;

    let data: ChatCompletionResponse = serde_json::from_str(&raw)
        .map_err(|e| CompletionError::Unexpected(format!("Invalid completion response: {}", e)))?;

    let text = data
        .into_text()
        .ok_or_else(|| CompletionError::Unexpected("No completion choice found".to_string()))?;

    debug!("run_completion model={} result={}", req.model, text);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use text_completion::{ApiKey, Message};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn handler(server: &MockServer) -> OpenRouterHandler {
        OpenRouterHandler::new(format!("{}/api/v1/chat/completions", server.uri()))
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            api_key: ApiKey::new("sk-or-test"),
            model: "deepseek/deepseek-r1-zero:free".to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(5),
            messages: vec![Message::system("rules"), Message::user("Tips?")],
        }
    }

    #[tokio::test]
    async fn test_success_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-or-test"))
            .and(header("content-type", "application/json"))
            .and(header("http-referer", "https://energy-saver.streamlit.app"))
            .and(header("x-title", "AI-Based Home Energy Saver"))
            .and(body_partial_json(json!({
                "model": "deepseek/deepseek-r1-zero:free",
                "temperature": 0.7,
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "Tips?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "- Air-dry laundry"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = run_completion(&handler(&server), &request()).await.unwrap();
        assert_eq!(text, "- Air-dry laundry");
    }

    #[tokio::test]
    async fn test_server_error_is_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = run_completion(&handler(&server), &request())
            .await
            .unwrap_err();
        match err {
            CompletionError::Network(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
                assert!(!message.contains("sk-or-test"));
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_choices_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "gen-1"})))
            .mount(&server)
            .await;

        let err = run_completion(&handler(&server), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = run_completion(&handler(&server), &request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CompletionError::Unexpected("No completion choice found".to_string())
        );
    }

    #[tokio::test]
    async fn test_timeout_is_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut req = request();
        req.timeout = Duration::from_millis(100);
        let err = run_completion(&handler(&server), &req).await.unwrap_err();
        assert!(matches!(err, CompletionError::Network(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network() {
        //nothing listens on port 9 of localhost
        let handler = OpenRouterHandler::new("http://127.0.0.1:9/api/v1/chat/completions");
        let err = run_completion(&handler, &request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Network(_)));
    }
}
