//! One posting cycle: load corpus and cursor, build the next message, segment
//! it, publish the chunks and move the cursor.
//!
//! # Responsibilities
//! - Fail-fast: the first error ends the run and is returned to the caller.
//! - The cursor is written only after every chunk went out, so a failed run
//!   starts from the same unit next time. Chunks posted before the failure
//!   will be posted again (at-least-once).
//! - No locking: two concurrent runs against the same store can double-post
//!   or skip units. The scheduler must run at most one at a time.
//!
//! # Navigation
//! - Entrypoint: [`Bot::run_once`]
//! - Outcome: [`RunReport`]

use tracing::{debug, error, info};

use crate::advance::advance;
use crate::config::BotSettings;
use crate::contract::Context;
use crate::error::PostError;
use crate::publish::Publisher;
use crate::segment::segment;
use crate::store::{CorpusStore, CursorStore};

/// Stages of a run in the order they are reached. `CursorSaved` is the only
/// successful end state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    CorpusLoaded,
    CursorLoaded,
    Advanced,
    Segmented,
    Published,
    CursorSaved,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub start_index: usize,
    pub next_index: usize,
    pub chunks_posted: usize,
}

pub struct Bot {
    corpus: CorpusStore,
    cursor: CursorStore,
    publisher: Publisher,
    char_limit: usize,
}

impl Bot {
    pub fn new(context: &Context, settings: &BotSettings) -> Self {
        Self {
            corpus: CorpusStore::new(
                context.store.clone(),
                settings.corpus_key.clone(),
                context.retry,
            ),
            cursor: CursorStore::new(
                context.store.clone(),
                settings.cursor_key.clone(),
                context.retry,
            ),
            publisher: Publisher::new(context.poster.clone(), context.retry),
            char_limit: settings.char_limit,
        }
    }

    pub async fn run_once(&self) -> Result<RunReport, PostError> {
        let mut state = RunState::Idle;
        let result = self.cycle(&mut state).await;
        match &result {
            Ok(report) => info!(?report, "Run complete"),
            Err(e) => error!(reached = ?state, error = %e, "Run aborted, cursor left untouched"),
        }
        result
    }

    async fn cycle(&self, state: &mut RunState) -> Result<RunReport, PostError> {
        let corpus = self.corpus.load().await?;
        transition(state, RunState::CorpusLoaded);

        let start_index = self.cursor.load().await?;
        transition(state, RunState::CursorLoaded);

        let (message, next_index) = advance(&corpus, start_index)?;
        transition(state, RunState::Advanced);

        let chunks = segment(&message, self.char_limit);
        info!(
            start_index,
            next_index,
            chars = message.chars().count(),
            chunks = chunks.len(),
            "Message prepared"
        );
        transition(state, RunState::Segmented);

        let chunks_posted = self.publisher.publish(&chunks).await?;
        transition(state, RunState::Published);

        self.cursor.save(next_index).await?;
        transition(state, RunState::CursorSaved);

        Ok(RunReport {
            start_index,
            next_index,
            chunks_posted,
        })
    }
}

fn transition(state: &mut RunState, next: RunState) {
    let from = *state;
    debug!(?from, to = ?next, "Run state transition");
    *state = next;
}
