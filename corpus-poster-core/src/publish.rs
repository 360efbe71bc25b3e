use std::sync::Arc;

use tracing::{error, info};

use crate::contract::Poster;
use crate::error::PostError;
use crate::retry::RetryPolicy;

/// Posts chunks in order through a [`Poster`].
pub struct Publisher {
    poster: Arc<dyn Poster>,
    retry: RetryPolicy,
}

impl Publisher {
    pub fn new(poster: Arc<dyn Poster>, retry: RetryPolicy) -> Self {
        Self { poster, retry }
    }

    /// Post every chunk, stopping at the first failure. Chunks already posted
    /// stay posted. Returns the number of chunks posted.
    pub async fn publish(&self, chunks: &[String]) -> Result<usize, PostError> {
        for (i, chunk) in chunks.iter().enumerate() {
            if let Err(e) = self.retry.run("post", || self.poster.post(chunk)).await {
                error!(
                    chunk = i + 1,
                    total = chunks.len(),
                    posted = i,
                    error = %e,
                    "Post failed, abandoning remaining chunks"
                );
                return Err(e);
            }
            info!(chunk = i + 1, total = chunks.len(), "Posted chunk");
        }
        Ok(chunks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::MockPoster;
    use mockall::Sequence;

    fn chunks(items: &[&str]) -> Vec<String> {
        items.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn posts_all_chunks_in_order() {
        let mut poster = MockPoster::new();
        let mut seq = Sequence::new();
        for expected in ["a 1/3", "b 2/3", "c 3/3"] {
            poster
                .expect_post()
                .withf(move |message| message == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let publisher = Publisher::new(Arc::new(poster), RetryPolicy::default());
        let posted = publisher
            .publish(&chunks(&["a 1/3", "b 2/3", "c 3/3"]))
            .await
            .unwrap();
        assert_eq!(posted, 3);
    }

    #[tokio::test]
    async fn stops_at_first_rejected_chunk() {
        let mut poster = MockPoster::new();
        let mut seq = Sequence::new();
        poster
            .expect_post()
            .withf(|message| message == "a 1/3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        poster
            .expect_post()
            .withf(|message| message == "b 2/3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(PostError::Backend {
                    status: 403,
                    message: "duplicate content".into(),
                })
            });

        let publisher = Publisher::new(Arc::new(poster), RetryPolicy::default());
        let result = publisher.publish(&chunks(&["a 1/3", "b 2/3", "c 3/3"])).await;
        assert!(matches!(result, Err(PostError::Backend { status: 403, .. })));
    }

    #[tokio::test]
    async fn flaky_connection_is_retried_per_chunk() {
        let mut poster = MockPoster::new();
        let mut refusals = 1;
        poster.expect_post().times(2).returning(move |_| {
            if refusals > 0 {
                refusals -= 1;
                Err(PostError::Connection("refused".into()))
            } else {
                Ok(())
            }
        });

        let publisher = Publisher::new(Arc::new(poster), RetryPolicy::default());
        assert_eq!(publisher.publish(&chunks(&["only"])).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn nothing_to_publish_posts_nothing() {
        let poster = MockPoster::new();
        let publisher = Publisher::new(Arc::new(poster), RetryPolicy::default());
        assert_eq!(publisher.publish(&[]).await.unwrap(), 0);
    }
}
