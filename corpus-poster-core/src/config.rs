use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::retry::DEFAULT_MAX_RETRIES;
use crate::segment::DEFAULT_CHAR_LIMIT;

/// Tunables of a run that do not depend on which backends are wired in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    #[serde(default = "default_corpus_key")]
    pub corpus_key: String,
    #[serde(default = "default_cursor_key")]
    pub cursor_key: String,
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            corpus_key: default_corpus_key(),
            cursor_key: default_cursor_key(),
            char_limit: default_char_limit(),
            max_retries: default_max_retries(),
        }
    }
}

impl BotSettings {
    pub fn trace_loaded(&self) {
        info!(
            corpus_key = %self.corpus_key,
            cursor_key = %self.cursor_key,
            char_limit = self.char_limit,
            max_retries = self.max_retries,
            "Loaded bot settings"
        );
        debug!(?self, "Bot settings loaded (full debug)");
    }
}

fn default_corpus_key() -> String {
    "corpus.json".to_string()
}

fn default_cursor_key() -> String {
    "index.json".to_string()
}

fn default_char_limit() -> usize {
    DEFAULT_CHAR_LIMIT
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}
