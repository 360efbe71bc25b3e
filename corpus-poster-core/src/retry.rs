use std::future::Future;

use tracing::{error, warn};

use crate::error::PostError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Naive retry on transient connection failures.
///
/// Up to `max_retries` attempts that fail with a connection error are retried
/// straight away. After that a final attempt runs and whatever it returns,
/// success or error, is handed back unchanged. Non-transient errors are never
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T, PostError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, PostError>>,
    {
        let mut failures = 0;
        while failures < self.max_retries {
            match op().await {
                Err(e) if e.is_transient() => {
                    failures += 1;
                    warn!(operation, attempt = failures, error = %e, "Transient failure, retrying");
                }
                other => return other,
            }
        }

        let result = op().await;
        if let Err(e) = &result {
            error!(operation, attempts = failures + 1, error = %e, "Giving up after final attempt");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn flaky(calls: &AtomicU32, fail_first: u32) -> Result<u32, PostError> {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= fail_first {
            Err(PostError::Connection(format!("attempt {n} refused")))
        } else {
            Ok(n)
        }
    }

    #[tokio::test]
    async fn success_needs_a_single_attempt() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::default().run("op", || flaky(&calls, 0)).await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connection_errors_are_retried() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::default().run("op", || flaky(&calls, 2)).await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn final_attempt_after_bound_can_still_succeed() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::new(3).run("op", || flaky(&calls, 3)).await;
        assert_eq!(result.unwrap(), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn final_attempt_error_is_returned_as_is() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::new(3).run("op", || flaky(&calls, 10)).await;
        match result {
            Err(PostError::Connection(msg)) => assert_eq!(msg, "attempt 4 refused"),
            other => panic!("expected connection error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), PostError> = RetryPolicy::default()
            .run("op", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(PostError::Backend {
                        status: 403,
                        message: "duplicate content".into(),
                    })
                }
            })
            .await;
        assert!(matches!(result, Err(PostError::Backend { status: 403, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_retries_means_one_attempt() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::new(0).run("op", || flaky(&calls, 1)).await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
