//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the Aurelio storefront
#[derive(Parser, Debug)]
#[command(name = "aurelio")]
#[command(author, version, about = "Aurelio storefront - cart and AI styling concierge")]
#[command(long_about = r#"
Aurelio is a terminal storefront for handcrafted Italian footwear.

Browse the catalog, keep a cart, and ask the Aurelio concierge for
styling advice. The concierge only recommends products from the catalog.

Configuration files are loaded from (in priority order):
1. --config <path>                  Explicit config file
2. ./aurelio.toml or ./.aurelio.toml Project-level config
3. ~/.config/aurelio/config.toml    Global config

The service credential is read from the environment variable named by
[advice] api_key_env (API_KEY by default).

Example:
  aurelio
  aurelio "Necesito zapatos negros para una boda formal"
  aurelio --catalog my-catalog.toml --model gemini-2.5-flash
"#)]
pub struct Cli {
    /// Ask the concierge once and exit (starts the interactive storefront when omitted)
    pub query: Option<String>,

    /// Catalog file (TOML or JSON) replacing the built-in collection
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Model identifier for styling advice
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
