//! Application layer for the Aurelio storefront
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AdviceParams, DEFAULT_TEMPERATURE};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, GenerationRequest, LlmGateway},
};
pub use use_cases::request_advice::{AdviceOutcome, AdviceReply, RequestAdviceUseCase};
pub use use_cases::storefront_session::{AdvicePhase, SendOutcome, StorefrontSession};
