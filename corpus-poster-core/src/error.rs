use thiserror::Error;

/// Every failure a run can hit. The driver surfaces these untouched; the
/// binary decides to log and exit cleanly.
#[derive(Error, Debug)]
pub enum PostError {
    #[error("store unavailable for '{key}': {reason}")]
    StoreUnavailable { key: String, reason: String },

    #[error("object '{key}' not found")]
    NotFound { key: String },

    #[error("index {index} out of range for corpus of {len} units")]
    OutOfRange { index: usize, len: usize },

    #[error("backend rejected post (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("connection error: {0}")]
    Connection(String),
}

impl PostError {
    /// Only connection failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, PostError::Connection(_))
    }

    pub(crate) fn unavailable(key: &str, reason: impl std::fmt::Display) -> Self {
        PostError::StoreUnavailable {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
