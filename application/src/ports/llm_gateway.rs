//! LLM Gateway port
//!
//! Defines the interface for communicating with the external
//! generative-text service that backs the stylist.

use async_trait::async_trait;
use aurelio_domain::{AdviceContext, AdviceModel};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Service returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Missing credential or configuration, as opposed to a service failure
    pub fn is_not_configured(&self) -> bool {
        matches!(self, GatewayError::NotConfigured(_))
    }

    /// Short category name for diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured(_) => "not_configured",
            GatewayError::ConnectionError(_) => "connection",
            GatewayError::HttpStatus { .. } => "http_status",
            GatewayError::MalformedResponse(_) => "malformed_response",
            GatewayError::Timeout => "timeout",
            GatewayError::Other(_) => "other",
        }
    }
}

/// One generation request: system directive, user turn and sampling settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: AdviceModel,
    pub system_instruction: String,
    pub user_turn: String,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn from_context(context: &AdviceContext, model: AdviceModel, temperature: f32) -> Self {
        Self {
            model,
            system_instruction: context.system_instruction(),
            user_turn: context.user_turn(),
            temperature,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the generative-text
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Whether a credential/configuration is present.
    ///
    /// Checked before any request is issued.
    fn is_configured(&self) -> bool {
        true
    }

    /// Generate text for the request. An empty string means the service
    /// answered without text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}
