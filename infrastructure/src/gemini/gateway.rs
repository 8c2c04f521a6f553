//! Gemini implementation of the LLM gateway port
//!
//! One stateless `generateContent` call per advice request. The credential
//! is resolved once at construction; without it the gateway reports itself
//! unconfigured and never touches the network.

use super::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::config::FileAdviceConfig;
use async_trait::async_trait;
use aurelio_application::{GatewayError, GenerationRequest, LlmGateway};
use std::time::Duration;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_source: String,
}

impl GeminiGateway {
    /// Create a gateway for `endpoint` with an optional credential.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().user_agent("AurelioStorefront/0.3");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
            api_key_source: "explicit".to_string(),
        })
    }

    /// Create a gateway from the `[advice]` configuration section.
    pub fn from_config(config: &FileAdviceConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                env = %config.api_key_env,
                "No API key found; the stylist will answer with a configuration notice"
            );
        } else {
            info!(endpoint = %config.endpoint, model = %config.model, "Gemini gateway ready");
        }
        let mut gateway = Self::new(config.endpoint.clone(), api_key, config.timeout())?;
        gateway.api_key_source = config.api_key_env.clone();
        Ok(gateway)
    }

    fn url(&self, request: &GenerationRequest) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint,
            request.model.as_str()
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GatewayError::NotConfigured(format!(
                "no credential in {}",
                self.api_key_source
            )));
        };

        let url = self.url(request);
        debug!(url = %url, temperature = request.temperature, "Calling generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown").to_string());
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(body.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurelio_domain::AdviceModel;

    fn request() -> GenerationRequest {
        GenerationRequest {
            model: AdviceModel::Gemini3Flash,
            system_instruction: "Eres Aurelio".to_string(),
            user_turn: "hola".to_string(),
            temperature: 0.7,
        }
    }

    #[test]
    fn test_url_includes_model() {
        let gateway = GeminiGateway::new("https://example.test/v1beta/", None, None).unwrap();
        assert_eq!(
            gateway.url(&request()),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_missing_key_is_unconfigured() {
        let config = FileAdviceConfig {
            api_key_env: "AURELIO_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        let gateway = GeminiGateway::from_config(&config).unwrap();
        assert!(!gateway.is_configured());
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_network() {
        // Unroutable endpoint: reaching the network would surface a connection error
        let gateway = GeminiGateway::new("http://192.0.2.1", None, None).unwrap();
        let err = gateway.generate(&request()).await.unwrap_err();
        assert!(err.is_not_configured());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        let gateway = GeminiGateway::new(
            "http://127.0.0.1:9",
            Some("key".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let err = gateway.generate(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::Timeout
        ));
    }
}
