// ABOUTME: Provider module aggregating the chat-completion adapters.
// ABOUTME: Holds the message building, HTTP status mapping, and response parsing both adapters share.

pub mod azure;
pub mod openai;

use serde_json::{Value, json};

use venturesynapse_core::ChatMessage;

use crate::runtime::CompletionError;

/// Upper bound on generated tokens per stage.
pub(crate) const MAX_TOKENS: u32 = 4096;

/// Build the Chat Completions `messages` array: the system prompt first,
/// then the conversation history in order.
pub fn build_messages(system_prompt: &str, history: &[ChatMessage]) -> Vec<Value> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(json!({
        "role": "system",
        "content": system_prompt
    }));

    for msg in history {
        messages.push(json!({
            "role": msg.role.as_str(),
            "content": msg.content
        }));
    }

    messages
}

/// Send a prepared request and map the HTTP outcome onto `CompletionError`.
/// `key_var` names the credential variable to point at on a 401.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    key_var: &str,
) -> Result<Value, CompletionError> {
    let response = request
        .send()
        .await
        .map_err(|e| CompletionError::ProviderError(format!("HTTP request failed: {}", e)))?;

    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(CompletionError::RateLimited);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(CompletionError::ProviderError(format!(
            "Unauthorized: check {}",
            key_var
        )));
    }

    if status.is_server_error() {
        return Err(CompletionError::ProviderError(format!(
            "Server error: {}",
            status
        )));
    }

    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(CompletionError::ProviderError(format!(
            "API error {}: {}",
            status, error_body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| CompletionError::InvalidResponse(format!("failed to parse JSON: {}", e)))
}

/// Extract the assistant text from a Chat Completions response body.
pub fn parse_response(response_body: &Value) -> Result<String, CompletionError> {
    let choice = response_body
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| {
            CompletionError::InvalidResponse("missing choices array in response".to_string())
        })?
        .first()
        .ok_or_else(|| CompletionError::InvalidResponse("empty choices array".to_string()))?;

    let message = choice.get("message").ok_or_else(|| {
        CompletionError::InvalidResponse("missing message in choice".to_string())
    })?;

    match message.get("content").and_then(|c| c.as_str()) {
        Some(content) => Ok(content.to_string()),
        None => {
            let finish_reason = choice
                .get("finish_reason")
                .and_then(|f| f.as_str())
                .unwrap_or("unknown");
            Err(CompletionError::InvalidResponse(format!(
                "no text content in response (finish_reason: {})",
                finish_reason
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use venturesynapse_core::Conversation;

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    /// Accept a single connection on a local port, answer it with `response`,
    /// and return the base URL to call.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let mut read = 0;
            // Drain the request head before answering.
            while read < buf.len() {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                if n == 0 {
                    break;
                }
                read += n;
                if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    async fn send_with_response(response: String) -> Result<Value, CompletionError> {
        let url = serve_once(response).await;
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        send(client.get(url), "OPENAI_API_KEY").await
    }

    #[tokio::test]
    async fn send_maps_429_to_rate_limited() {
        let result = send_with_response(http_response("429 Too Many Requests", "")).await;
        assert!(matches!(result, Err(CompletionError::RateLimited)));
    }

    #[tokio::test]
    async fn send_maps_401_to_credential_hint() {
        let err = send_with_response(http_response("401 Unauthorized", ""))
            .await
            .unwrap_err();

        match err {
            CompletionError::ProviderError(msg) => {
                assert_eq!(msg, "Unauthorized: check OPENAI_API_KEY");
            }
            other => panic!("expected ProviderError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_maps_5xx_to_server_error() {
        let err = send_with_response(http_response("503 Service Unavailable", ""))
            .await
            .unwrap_err();

        match err {
            CompletionError::ProviderError(msg) => {
                assert_eq!(msg, "Server error: 503 Service Unavailable");
            }
            other => panic!("expected ProviderError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_includes_body_for_other_failures() {
        let err = send_with_response(http_response("400 Bad Request", r#"{"error":"x"}"#))
            .await
            .unwrap_err();

        match err {
            CompletionError::ProviderError(msg) => {
                assert_eq!(msg, r#"API error 400 Bad Request: {"error":"x"}"#);
            }
            other => panic!("expected ProviderError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_returns_json_body_on_success() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"ok"},"finish_reason":"stop"}]}"#;

        let value = send_with_response(http_response("200 OK", body)).await.unwrap();

        assert_eq!(parse_response(&value).unwrap(), "ok");
    }

    #[tokio::test]
    async fn send_rejects_non_json_success_body() {
        let err = send_with_response(http_response("200 OK", "not json"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::InvalidResponse(_)));
        assert!(err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn messages_start_with_system_prompt_then_history() {
        let mut convo = Conversation::new();
        convo.add_user_message("artifacts");
        convo.add_agent_message("DiscoveryAgent", "snapshot");
        convo.add_user_message("now score");

        let messages = build_messages("You are ScoringAgent", convo.messages());

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "You are ScoringAgent");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], "snapshot");
        assert_eq!(messages[3]["content"], "now score");
    }

    #[test]
    fn parses_text_response() {
        let response = json!({
            "id": "chatcmpl-456",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "- Company snapshot: procurement copilot"
                    },
                    "finish_reason": "stop"
                }
            ]
        });

        let text = parse_response(&response).unwrap();
        assert_eq!(text, "- Company snapshot: procurement copilot");
    }

    #[test]
    fn rejects_missing_choices() {
        let err = parse_response(&json!({"error": {"message": "boom"}})).unwrap_err();
        assert!(err.to_string().contains("missing choices"));
    }

    #[test]
    fn rejects_empty_choices() {
        let err = parse_response(&json!({"choices": []})).unwrap_err();
        assert!(err.to_string().contains("empty choices"));
    }

    #[test]
    fn rejects_null_content() {
        let response = json!({
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": null},
                    "finish_reason": "content_filter"
                }
            ]
        });

        let err = parse_response(&response).unwrap_err();
        assert!(matches!(err, CompletionError::InvalidResponse(_)));
        assert!(err.to_string().contains("content_filter"));
    }
}
