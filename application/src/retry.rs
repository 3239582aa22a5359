//! Bounded retry with exponential backoff for model queries.
//!
//! Retry is layered on top of [`ModelClient::query`], which itself never
//! retries. The loop is explicit: each attempt produces a result value,
//! and the backoff delay is an ordinary await between attempts. Sibling
//! invocations in the fan-out phase are unaffected while one invocation
//! is backing off.

use crate::config::QueryParams;
use crate::ports::model_client::{ClientError, ModelClient};
use chorus_domain::ModelOutcome;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry policy: bounded attempts with exponential backoff.
///
/// The delay after attempt `n` is `min_delay * 2^(n-1)`, capped at
/// `max_delay`. With the defaults this gives 4s, then 8s, across three
/// attempts total.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff floor
    pub min_delay: Duration,
    /// Backoff ceiling
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the `attempt`-th failure (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.min_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Query a client, retrying failed attempts per `policy`.
///
/// All error kinds are retried uniformly, including ones that are
/// unlikely to recover.
/// TODO: stop retrying `ClientError::AuthenticationError`; a bad
/// credential never recovers and the backoff only delays the failure.
///
/// Success on any attempt returns immediately. If every attempt fails,
/// the final error is returned; the caller converts it into a failed
/// [`ModelOutcome`].
pub async fn query_with_retry(
    client: &dyn ModelClient,
    prompt: &str,
    params: &QueryParams,
    policy: &RetryPolicy,
) -> Result<ModelOutcome, ClientError> {
    let mut attempt = 1;
    loop {
        match client.query(prompt, params).await {
            Ok(outcome) => return Ok(outcome),
            Err(e) if attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    source_id = client.source_id(),
                    attempt,
                    delay_secs = delay.as_secs_f64(),
                    "Query failed, retrying: {}",
                    e
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(
                    source_id = client.source_id(),
                    attempt, "Query failed, retries exhausted: {}", e
                );
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedClient {
        id: String,
        replies: Mutex<VecDeque<Result<String, ClientError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(id: &str, replies: Vec<Result<String, ClientError>>) -> Self {
            Self {
                id: id.to_string(),
                replies: Mutex::new(VecDeque::from(replies)),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        fn source_id(&self) -> &str {
            &self.id
        }

        async fn query(
            &self,
            _prompt: &str,
            _params: &QueryParams,
        ) -> Result<ModelOutcome, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(content)) => Ok(ModelOutcome::success(&self.id, content)),
                Some(Err(e)) => Err(e),
                None => Err(ClientError::RequestFailed("script exhausted".to_string())),
            }
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for(2), Duration::from_secs(8));
        assert_eq!(policy.delay_for(3), Duration::from_secs(10));
        assert_eq!(policy.delay_for(10), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn first_attempt_success_does_not_retry() {
        let client = ScriptedClient::new("m", vec![Ok("hi".to_string())]);
        let outcome = query_with_retry(
            &client,
            "p",
            &QueryParams::default(),
            &RetryPolicy::default(),
        )
        .await
        .unwrap();
        assert_eq!(outcome.content, "hi");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_second_attempt_with_two_calls() {
        let client = ScriptedClient::new(
            "m",
            vec![
                Err(ClientError::ConnectionError("reset".to_string())),
                Ok("recovered".to_string()),
            ],
        );
        let outcome = query_with_retry(
            &client,
            "p",
            &QueryParams::default(),
            &RetryPolicy::default(),
        )
        .await
        .unwrap();
        assert_eq!(outcome.content, "recovered");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_three_attempts() {
        let client = ScriptedClient::new(
            "m",
            vec![
                Err(ClientError::RequestFailed("boom".to_string())),
                Err(ClientError::RequestFailed("boom".to_string())),
                Err(ClientError::RequestFailed("boom".to_string())),
                Ok("never reached".to_string()),
            ],
        );
        let result = query_with_retry(
            &client,
            "p",
            &QueryParams::default(),
            &RetryPolicy::default(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_attempts() {
        let client = ScriptedClient::new(
            "m",
            vec![
                Err(ClientError::RequestFailed("boom".to_string())),
                Ok("ok".to_string()),
            ],
        );
        let start = tokio::time::Instant::now();
        query_with_retry(
            &client,
            "p",
            &QueryParams::default(),
            &RetryPolicy::default(),
        )
        .await
        .unwrap();
        // One failure means one 4s backoff before the second attempt.
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }
}
