//! Configuration file loading for the Aurelio storefront
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./aurelio.toml` or `./.aurelio.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/aurelio/config.toml`
//! 4. `AURELIO_*` environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, FileAdviceConfig,
    FileCatalogConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
