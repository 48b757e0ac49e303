//! Catalog Client CLI application
//!
//! Command-line interface for browsing a published content catalog and
//! fetching content with its available translations.

use std::process;

use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use catalog_client::cli::{handle_command, load_config, Cli};
use catalog_client::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = load_config(&cli.global).await?;

    let level = cli
        .log_level()
        .map(str::to_string)
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, cli.global.very_verbose);

    info!("Catalog Client v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Using catalog at {}", config.catalog.base_url);

    handle_command(cli.command, &cli.global, config).await
}

/// Initialize logging at the given level
fn init_logging(level: &str, show_levels: bool) {
    let mut filter = EnvFilter::from_default_env();
    match format!("catalog_client={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(show_levels)
        .with_writer(std::io::stderr)
        .init();
}
