//! Chat transcript with the stylist.
//!
//! - [`log::ConversationLog`]: append-only transcript for one session
//! - [`log::ChatMessage`]: a single immutable turn
//! - [`log::ChatRole`]: shopper or assistant

pub mod log;
