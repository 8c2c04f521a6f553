//! Gemini adapter for the generative-text service.
//!
//! - [`gateway::GeminiGateway`]: [`LlmGateway`](aurelio_application::LlmGateway) over HTTP
//! - [`protocol`]: request/response wire types

pub mod gateway;
pub mod protocol;

pub use gateway::GeminiGateway;
