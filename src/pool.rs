/// Bounded async front for the keyword pipeline.
///
/// Extraction is synchronous CPU work. Async callers go through
/// [`KeywordPool`], which runs each call on tokio's blocking threads and
/// caps how many run at once.
///
/// A timed-out call only stops the waiting: the blocking task has no
/// cancellation point and keeps its permit until it finishes.
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::pipeline::KeywordPipeline;
use crate::tokenizer::router::TokenizationError;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error(transparent)]
    Tokenization(#[from] TokenizationError),

    #[error("keyword extraction timed out after {0:?}")]
    Timeout(Duration),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("worker pool is closed")]
    Closed,
}

#[derive(Clone)]
pub struct KeywordPool {
    pipeline: Arc<KeywordPipeline>,
    permits: Arc<Semaphore>,
}

impl KeywordPool {
    pub fn new(pipeline: Arc<KeywordPipeline>, workers: usize) -> Self {
        Self {
            pipeline,
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Run [`KeywordPipeline::top_n_tokens`] on a blocking worker.
    pub async fn top_n_tokens(&self, text: String, top_n: usize) -> Result<Vec<String>, PoolError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PoolError::Closed)?;
        let pipeline = self.pipeline.clone();

        let tokens = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            pipeline.top_n_tokens(&text, top_n)
        })
        .await??;

        Ok(tokens)
    }

    /// Like [`Self::top_n_tokens`], giving up on the result after `timeout`.
    pub async fn top_n_tokens_with_timeout(
        &self,
        text: String,
        top_n: usize,
        timeout: Duration,
    ) -> Result<Vec<String>, PoolError> {
        match tokio::time::timeout(timeout, self.top_n_tokens(text, top_n)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Keyword extraction abandoned after {timeout:?}");
                Err(PoolError::Timeout(timeout))
            }
        }
    }

    /// Stop accepting new work. Calls already holding a permit finish.
    pub fn close(&self) {
        self.permits.close();
    }
}
