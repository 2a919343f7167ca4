use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::retry_policy::RetryPolicy;
use crate::infrastructure::response::is_placeholder_reply;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps any client with a bounded retry loop.
///
/// Rate limits and placeholder replies are retried after the policy's delay;
/// every other failure is returned immediately.
pub struct RetryingClient {
    inner: Arc<dyn LLMClient + Send + Sync>,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(inner: Arc<dyn LLMClient + Send + Sync>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl LLMClient for RetryingClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = AppError::Internal("no attempt made".to_string());

        for attempt in 0..max_attempts {
            match self.inner.generate(config, system, user).await {
                Ok(text) if !is_placeholder_reply(&text) => {
                    debug!(attempt = attempt + 1, "LLM request succeeded");
                    return Ok(text);
                }
                Ok(text) => {
                    last_error = AppError::LLMTransient(format!(
                        "Placeholder reply from model: {:?}",
                        text.trim()
                    ));
                }
                Err(err) if err.is_transient() => last_error = err,
                Err(err) => return Err(err),
            }

            match self.policy.delay_after(attempt) {
                Some(delay) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %last_error,
                        "Retrying LLM request"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => break,
            }
        }

        Err(AppError::RetriesExhausted(format!(
            "{} attempt(s) failed; last error: {}",
            max_attempts, last_error
        )))
    }
}
