//! Interactive storefront module
//!
//! Provides a readline-based interface for browsing the catalog, managing
//! the cart and chatting with the Aurelio concierge.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::StorefrontRepl;
