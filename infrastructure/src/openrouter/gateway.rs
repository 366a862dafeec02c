//! OpenRouter gateway implementation

use super::protocol::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use council_application::{GatewayError, InferenceGateway};
use council_domain::{ChatMessage, Model, ModelReply};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Inference gateway backed by an OpenRouter-compatible chat-completions API
pub struct OpenRouterGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl OpenRouterGateway {
    /// Create a gateway for `endpoint`.
    ///
    /// `api_key` may be absent; every request then fails as missing
    /// credentials. `api_key_env` is only used in that error message.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
            api_key_env: api_key_env.into(),
        }
    }

    /// Send one request, distinguishing every failure cause.
    pub async fn try_query(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<ModelReply, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingApiKey(self.api_key_env.clone()))?;

        let body = CompletionRequest {
            model: model.as_str(),
            messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Self::map_transport_error(e, timeout))?;

        parsed
            .into_reply()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))
    }

    fn map_transport_error(error: reqwest::Error, timeout: Duration) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(timeout)
        } else if error.is_decode() {
            GatewayError::InvalidResponse(error.to_string())
        } else {
            GatewayError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl InferenceGateway for OpenRouterGateway {
    async fn query(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Option<ModelReply> {
        match self.try_query(model, messages, timeout).await {
            Ok(reply) => {
                debug!("Model {} replied with {} chars", model, reply.content.len());
                Some(reply)
            }
            Err(e) => {
                warn!("Error querying model {}: {}", model, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(server: &MockServer) -> OpenRouterGateway {
        OpenRouterGateway::new(
            format!("{}/api/v1/chat/completions", server.uri()),
            Some("test-key".to_string()),
            "OPENROUTER_API_KEY",
        )
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::user("What is Rust?")]
    }

    #[tokio::test]
    async fn test_successful_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "openai/gpt-5.1",
                "messages": [{"role": "user", "content": "What is Rust?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "A language."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = gateway(&server)
            .query(&Model::Gpt51, &messages(), Duration::from_secs(5))
            .await;

        assert_eq!(reply.unwrap().content, "A language.");
    }

    #[tokio::test]
    async fn test_error_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let gateway = gateway(&server);
        let err = gateway
            .try_query(&Model::Gpt51, &messages(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 429, .. }));

        assert!(
            gateway
                .query(&Model::Gpt51, &messages(), Duration::from_secs(5))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_timeout_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = gateway(&server)
            .try_query(&Model::Gpt51, &messages(), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .try_query(&Model::Gpt51, &messages(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gateway = OpenRouterGateway::new(
            format!("{}/api/v1/chat/completions", server.uri()),
            None,
            "OPENROUTER_API_KEY",
        );
        let err = gateway
            .try_query(&Model::Gpt51, &messages(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey(ref var) if var == "OPENROUTER_API_KEY"));
    }
}
