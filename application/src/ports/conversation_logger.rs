//! Port for structured conversation logging.
//!
//! Records stylist events (shopper queries, advice replies and their
//! outcome) as machine-readable records, separate from `tracing`
//! diagnostics.

use serde_json::Value;

/// Event type for a shopper query appended to the log.
pub const SHOPPER_QUERY: &str = "shopper_query";
/// Event type for an assistant reply (answer or fallback).
pub const ADVICE_REPLY: &str = "advice_reply";

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "shopper_query", "advice_reply").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
