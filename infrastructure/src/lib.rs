//! Infrastructure layer for the Aurelio storefront
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and catalog loading.

pub mod catalog;
pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use catalog::{CatalogLoadError, CatalogLoader};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAdviceConfig, FileCatalogConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use gemini::GeminiGateway;
pub use logging::JsonlConversationLogger;
