//! Domain layer for the Aurelio storefront
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Catalog**: the ordered, session-immutable product list
//! - **Cart Ledger**: (product, quantity) lines with derived totals
//! - **Conversation Log**: the append-only transcript with the stylist
//! - **Context Builder**: catalog + transcript + query → advice payload

pub mod cart;
pub mod catalog;
pub mod conversation;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use cart::ledger::{CartLedger, CartLine, CartSnapshot};
pub use catalog::entities::{Catalog, Product};
pub use conversation::log::{ChatMessage, ChatRole, ConversationLog, MessageId};
pub use self::core::{error::DomainError, model::AdviceModel, string::truncate};
pub use prompt::{AdviceContext, BOLD_MARKER, ContextBuilder, StylistPromptTemplate};
