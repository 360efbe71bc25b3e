use clap::Parser;
use corpus_poster::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    tracing::info!(config = ?cli.config, "CLI arguments parsed, invoking run");

    // Failures are logged, never turned into a crash or a non-zero exit: the
    // cursor was not moved, so the next scheduled run retries the same unit.
    match run(cli).await {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => {
            let message = format!("{e:#}");
            tracing::error!(error = %message, "Run failed");
        }
    }
}
