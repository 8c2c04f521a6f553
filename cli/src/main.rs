//! CLI entrypoint for the Aurelio storefront
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use aurelio_application::{RequestAdviceUseCase, StorefrontSession};
use aurelio_domain::AdviceModel;
use aurelio_infrastructure::{
    CatalogLoader, ConfigLoader, FileConfig, GeminiGateway, JsonlConversationLogger,
};
use aurelio_presentation::{Cli, OutputConfig, ReplConfig, StorefrontRepl};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // CLI flags override file configuration
    if let Some(model) = &cli.model {
        config.advice.model = AdviceModel::from(model.as_str());
    }
    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.clone());
    }
    config.validate().context("Invalid configuration")?;

    // Initialize logging based on verbosity level
    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir.as_deref())?;

    info!("Starting Aurelio storefront");

    let output_config = OutputConfig {
        color: config.output.color,
    };
    output_config.apply();

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.clone(),
    };

    let session = build_session(&config)?;

    if !config.advice.model.is_known() {
        warn!(model = %config.advice.model, "Using a model identifier outside the known set");
    }

    let repl = StorefrontRepl::new(Arc::new(session))
        .with_progress(repl_config.show_progress)
        .with_history_file(repl_config.history_path());

    // Single query mode
    if let Some(query) = cli.query.as_deref() {
        repl.ask(query).await;
        return Ok(());
    }

    repl.run().await?;
    Ok(())
}

/// Catalog, gateway and advice use case wired into one session.
fn build_session(config: &FileConfig) -> Result<StorefrontSession> {
    let catalog =
        CatalogLoader::load(config.catalog.path.as_deref()).context("Failed to load catalog")?;
    info!(products = catalog.len(), "Catalog ready");

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiGateway::from_config(&config.advice)?);
    let advice = RequestAdviceUseCase::new(gateway, config.advice.to_params());

    let mut session = StorefrontSession::new(Arc::new(catalog), advice);

    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!(path = %logger.path().display(), session = logger.session(), "Conversation log enabled");
                session = session.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation log disabled"),
        }
    }

    Ok(session)
}

/// Install the tracing subscriber; diagnostics go to a daily file when `log_dir` is set.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "aurelio.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}
