//! Request Advice use case.
//!
//! The Advice Client: builds the context window, calls the generative-text
//! service once and always resolves to displayable text.
//!
//! Failures never leave this module. A missing credential, a transport or
//! HTTP failure, a malformed or empty response and a timeout each map to a
//! fixed fallback text; the [`AdviceOutcome`] keeps the distinction for
//! diagnostics. There is no retry.

use crate::config::AdviceParams;
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use aurelio_domain::{Catalog, ChatMessage, ContextBuilder, StylistPromptTemplate, truncate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How an advice round-trip ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceOutcome {
    /// The service returned non-empty text.
    Answered,
    /// The service answered without text.
    EmptyResponse,
    /// No credential/configuration; no request was sent.
    NotConfigured,
    /// Transport, HTTP, parsing or timeout failure.
    ServiceFailed,
}

impl AdviceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceOutcome::Answered => "answered",
            AdviceOutcome::EmptyResponse => "empty_response",
            AdviceOutcome::NotConfigured => "not_configured",
            AdviceOutcome::ServiceFailed => "service_failed",
        }
    }

    /// Whether the text came from the service rather than a fallback.
    pub fn is_answered(&self) -> bool {
        matches!(self, AdviceOutcome::Answered)
    }
}

impl std::fmt::Display for AdviceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one advice round-trip. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceReply {
    pub text: String,
    pub outcome: AdviceOutcome,
}

impl AdviceReply {
    fn answered(text: String) -> Self {
        Self {
            text,
            outcome: AdviceOutcome::Answered,
        }
    }

    pub(crate) fn fallback(outcome: AdviceOutcome) -> Self {
        let text = match outcome {
            AdviceOutcome::NotConfigured => StylistPromptTemplate::not_configured_fallback(),
            AdviceOutcome::EmptyResponse => StylistPromptTemplate::empty_response_fallback(),
            AdviceOutcome::Answered | AdviceOutcome::ServiceFailed => {
                StylistPromptTemplate::service_error_fallback()
            }
        };
        Self {
            text: text.to_string(),
            outcome,
        }
    }
}

/// Use case for requesting styling advice.
#[derive(Clone)]
pub struct RequestAdviceUseCase {
    gateway: Arc<dyn LlmGateway>,
    params: AdviceParams,
}

impl RequestAdviceUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, params: AdviceParams) -> Self {
        Self { gateway, params }
    }

    pub fn params(&self) -> &AdviceParams {
        &self.params
    }

    /// Ask the stylist about `query`, given the catalog and the prior transcript.
    pub async fn execute(
        &self,
        query: &str,
        catalog: &Catalog,
        history: &[ChatMessage],
    ) -> AdviceReply {
        if !self.gateway.is_configured() {
            warn!(
                category = "not_configured",
                "Advice gateway has no credential; skipping request"
            );
            return AdviceReply::fallback(AdviceOutcome::NotConfigured);
        }

        let context = ContextBuilder::new()
            .with_history_window(self.params.history_window)
            .build(query, catalog, history);
        let request =
            GenerationRequest::from_context(&context, self.params.model.clone(), self.params.temperature);

        info!(
            model = %self.params.model,
            history = history.len(),
            "Requesting advice: {}",
            truncate(query, 80)
        );

        let result = match self.params.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.generate(&request))
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => self.gateway.generate(&request).await,
        };

        match result {
            Ok(text) if text.trim().is_empty() => {
                warn!(category = "empty_response", "Advice service returned no text");
                AdviceReply::fallback(AdviceOutcome::EmptyResponse)
            }
            Ok(text) => {
                debug!(bytes = text.len(), "Advice received");
                AdviceReply::answered(text)
            }
            Err(e) if e.is_not_configured() => {
                warn!(category = e.category(), "Advice gateway not configured: {}", e);
                AdviceReply::fallback(AdviceOutcome::NotConfigured)
            }
            Err(e) => {
                warn!(category = e.category(), "Advice request failed: {}", e);
                AdviceReply::fallback(AdviceOutcome::ServiceFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use aurelio_domain::{ChatRole, ConversationLog, Product};
    use std::sync::Mutex;
    use std::time::Duration;

    // === Mock implementations ===

    enum Reply {
        Text(&'static str),
        Fail(fn() -> GatewayError),
        Slow,
    }

    struct MockGateway {
        configured: bool,
        reply: Reply,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl MockGateway {
        fn new(reply: Reply) -> Self {
            Self {
                configured: true,
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(Reply::Text("never sent"))
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Text(t) => Ok(t.to_string()),
                Reply::Fail(make) => Err(make()),
                Reply::Slow => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("3", "Roma Chelsea Boot", 520, "Boots"),
            Product::new("1", "The Milano Oxford", 450, "Oxford"),
        ])
        .unwrap()
    }

    fn use_case(gateway: Arc<MockGateway>) -> RequestAdviceUseCase {
        RequestAdviceUseCase::new(gateway, AdviceParams::default())
    }

    #[tokio::test]
    async fn test_answer_is_returned_verbatim() {
        let gateway = Arc::new(MockGateway::new(Reply::Text("Le recomiendo **Roma Chelsea Boot**.")));
        let reply = use_case(gateway.clone())
            .execute("necesito botas negras", &catalog(), &[])
            .await;
        assert_eq!(reply.outcome, AdviceOutcome::Answered);
        assert_eq!(reply.text, "Le recomiendo **Roma Chelsea Boot**.");
        assert_eq!(gateway.request_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_params_and_context() {
        let gateway = Arc::new(MockGateway::new(Reply::Text("ok")));
        let mut log = ConversationLog::with_greeting("Bienvenido");
        log.append(ChatRole::Shopper, "Tengo una boda");
        let params = AdviceParams::default().with_temperature(0.7);

        RequestAdviceUseCase::new(gateway.clone(), params)
            .execute("¿y para la oficina?", &catalog(), log.all())
            .await;

        let requests = gateway.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.model.as_str(), "gemini-3-flash-preview");
        assert!(request.system_instruction.contains("Roma Chelsea Boot (ID: 3)"));
        assert!(!request.user_turn.contains("Instrucciones"));
        assert!(request.user_turn.contains("Cliente: Tengo una boda"));
        assert!(request.user_turn.ends_with("Consulta actual del usuario: ¿y para la oficina?"));
    }

    #[tokio::test]
    async fn test_empty_body_resolves_to_rephrase_fallback() {
        let gateway = Arc::new(MockGateway::new(Reply::Text("   ")));
        let reply = use_case(gateway).execute("hola", &catalog(), &[]).await;
        assert_eq!(reply.outcome, AdviceOutcome::EmptyResponse);
        assert_eq!(reply.text, StylistPromptTemplate::empty_response_fallback());
    }

    #[tokio::test]
    async fn test_service_failure_resolves_to_apology() {
        let gateway = Arc::new(MockGateway::new(Reply::Fail(|| {
            GatewayError::ConnectionError("connection refused".into())
        })));
        let reply = use_case(gateway.clone()).execute("hola", &catalog(), &[]).await;
        assert_eq!(reply.outcome, AdviceOutcome::ServiceFailed);
        assert_eq!(reply.text, StylistPromptTemplate::service_error_fallback());
        // No retry
        assert_eq!(gateway.request_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_resolves_to_apology() {
        let gateway = Arc::new(MockGateway::new(Reply::Fail(|| {
            GatewayError::MalformedResponse("missing candidates".into())
        })));
        let reply = use_case(gateway).execute("hola", &catalog(), &[]).await;
        assert_eq!(reply.outcome, AdviceOutcome::ServiceFailed);
        assert!(!reply.text.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_detected_before_request() {
        let gateway = Arc::new(MockGateway::unconfigured());
        let reply = use_case(gateway.clone()).execute("hola", &catalog(), &[]).await;
        assert_eq!(reply.outcome, AdviceOutcome::NotConfigured);
        assert_eq!(reply.text, StylistPromptTemplate::not_configured_fallback());
        assert_eq!(gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_not_configured_error_from_adapter_keeps_its_category() {
        let gateway = Arc::new(MockGateway::new(Reply::Fail(|| {
            GatewayError::NotConfigured("API_KEY".into())
        })));
        let reply = use_case(gateway).execute("hola", &catalog(), &[]).await;
        assert_eq!(reply.outcome, AdviceOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn test_timeout_resolves_to_apology() {
        let gateway = Arc::new(MockGateway::new(Reply::Slow));
        let params = AdviceParams::default().with_timeout(Some(Duration::from_millis(20)));
        let reply = RequestAdviceUseCase::new(gateway, params)
            .execute("hola", &catalog(), &[])
            .await;
        assert_eq!(reply.outcome, AdviceOutcome::ServiceFailed);
        assert_eq!(reply.text, StylistPromptTemplate::service_error_fallback());
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(AdviceOutcome::NotConfigured.to_string(), "not_configured");
        assert!(AdviceOutcome::Answered.is_answered());
        assert!(!AdviceOutcome::EmptyResponse.is_answered());
    }
}
