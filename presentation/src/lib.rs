//! Presentation layer for the Aurelio storefront
//!
//! This crate contains the CLI definition, console formatting,
//! the advice loading indicator, and the interactive storefront REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ReplCommand, StorefrontRepl};
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::AdviceIndicator;
