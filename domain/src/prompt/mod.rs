//! Prompt domain
//!
//! Fixed stylist texts and the context builder that turns catalog,
//! transcript and query into one advice request payload.

pub mod context;
mod template;

pub use context::{AdviceContext, ContextBuilder};
pub use template::{BOLD_MARKER, StylistPromptTemplate};
