//!
//! This module implements the CLI surface of corpus-poster: argument parsing,
//! wiring of concrete backends and one posting run.
//!
//! All posting logic (segmenting, shout merging, cursor handling) lives in the
//! [`corpus-poster-core`] crate. This module only builds the clients described
//! by the config and hands them to [`Bot`].
//!
//! Running the binary without flags performs one full cycle using
//! `corpus-poster.yaml` from the working directory.
//!
//! [`corpus-poster-core`]: ../../corpus-poster-core/

use crate::gcs::GcsStore;
use crate::load_config::{load_config, CliConfig, StorageSection};
use crate::status::StatusClient;
use anyhow::{Context as _, Result};
use clap::Parser;
use corpus_poster_core::contract::{Context, ObjectStore};
use corpus_poster_core::retry::RetryPolicy;
use corpus_poster_core::run::{Bot, RunReport};
use corpus_poster_core::store::LocalFileStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Post the next message of a text corpus and advance the cursor.
#[derive(Parser, Debug)]
#[clap(
    name = "corpus-poster",
    version,
    about = "Post the next unit of a fixed text corpus, one run per invocation"
)]
pub struct Cli {
    /// Path to the YAML config file
    #[clap(long, default_value = "corpus-poster.yaml")]
    pub config: PathBuf,
}

/// Build the clients for one process. Constructed once and shared by every
/// store and the publisher.
pub fn build_context(config: &CliConfig) -> Result<Context> {
    let store: Arc<dyn ObjectStore> = match &config.storage {
        StorageSection::Local { root } => Arc::new(LocalFileStore::new(root)),
        StorageSection::Gcs { bucket, base_url } => {
            let token = config
                .gcs_token
                .as_deref()
                .context("gcs storage configured without an access token")?;
            Arc::new(GcsStore::new(base_url, bucket.clone(), token).context("building GCS client")?)
        }
    };
    let poster = StatusClient::new(config.poster.endpoint.clone(), config.poster_token.clone())
        .context("building status client")?;

    Ok(Context::new(
        store,
        Arc::new(poster),
        RetryPolicy::new(config.settings.max_retries),
    ))
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<RunReport> {
    tracing::info!("trace_initialised");

    let config = load_config(&cli.config)?;
    let context = build_context(&config)?;
    let bot = Bot::new(&context, &config.settings);

    let report = bot.run_once().await.context("posting run failed")?;
    tracing::info!(
        start_index = report.start_index,
        next_index = report.next_index,
        chunks_posted = report.chunks_posted,
        "Run finished"
    );
    Ok(report)
}
