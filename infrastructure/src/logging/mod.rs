//! Structured conversation logging (JSONL transcript of stylist events).

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
