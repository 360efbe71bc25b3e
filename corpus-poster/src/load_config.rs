//! `load_config` module: Loads a static YAML config and injects secrets from the environment.
//!
//! The YAML file only holds non-secret settings (where the corpus lives, keys,
//! character limit, retry bound, posting endpoint). Access tokens are read from
//! the environment so the file can be committed next to the corpus.
//!
//! # Errors
//! All errors use `anyhow::Error` and surface at the CLI boundary.

use anyhow::Result;
use corpus_poster_core::config::BotSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const POSTER_TOKEN_VAR: &str = "POSTER_ACCESS_TOKEN";
pub const GCS_TOKEN_VAR: &str = "GCS_ACCESS_TOKEN";

pub const DEFAULT_POST_ENDPOINT: &str = "https://api.twitter.com/2/tweets";
pub const DEFAULT_GCS_BASE_URL: &str = "https://storage.googleapis.com";

/// Where the corpus and cursor objects live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageSection {
    Local {
        root: PathBuf,
    },
    Gcs {
        bucket: String,
        #[serde(default = "default_gcs_base_url")]
        base_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PosterSection {
    #[serde(default = "default_post_endpoint")]
    pub endpoint: String,
}

impl Default for PosterSection {
    fn default() -> Self {
        Self {
            endpoint: default_post_endpoint(),
        }
    }
}

/// Fully merged configuration: static YAML plus environment secrets.
#[derive(Clone)]
pub struct CliConfig {
    pub storage: StorageSection,
    pub settings: BotSettings,
    pub poster: PosterSection,
    pub poster_token: String,
    pub gcs_token: Option<String>,
}

// Tokens never end up in logs.
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("storage", &self.storage)
            .field("settings", &self.settings)
            .field("poster", &self.poster)
            .field("poster_token", &"<redacted>")
            .field("gcs_token", &self.gcs_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: StorageSection,
    #[serde(flatten)]
    settings: BotSettings,
    #[serde(default)]
    poster: PosterSection,
}

fn default_post_endpoint() -> String {
    DEFAULT_POST_ENDPOINT.to_string()
}

fn default_gcs_base_url() -> String {
    DEFAULT_GCS_BASE_URL.to_string()
}

fn require_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => {
            error!(var, "Environment variable is empty");
            anyhow::bail!("{var} environment variable is empty")
        }
        Err(e) => {
            error!(error = ?e, var, "Environment variable not set");
            anyhow::bail!("{var} environment variable not set: {e}")
        }
    }
}

/// Loads a static YAML config file (no secrets) and injects required env vars for secrets.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if raw.settings.char_limit == 0 {
        anyhow::bail!("char_limit must be greater than zero");
    }

    let poster_token = require_env(POSTER_TOKEN_VAR)?;
    let gcs_token = match &raw.storage {
        StorageSection::Gcs { .. } => Some(require_env(GCS_TOKEN_VAR)?),
        StorageSection::Local { .. } => None,
    };

    raw.settings.trace_loaded();
    info!(storage = ?raw.storage, endpoint = %raw.poster.endpoint, "Config loaded and merged successfully");

    Ok(CliConfig {
        storage: raw.storage,
        settings: raw.settings,
        poster: raw.poster,
        poster_token,
        gcs_token,
    })
}
