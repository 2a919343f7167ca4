pub mod gemini;
pub mod openrouter;
pub mod retry;

#[cfg(test)]
pub(crate) mod fake;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use crate::domain::llm_config::LLMProvider;
use async_trait::async_trait;
use gemini::GeminiClient;
use openrouter::OpenRouterClient;
use std::time::Duration;

pub use retry::RetryingClient;

#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
}

pub struct RouterClient {
    openrouter: OpenRouterClient,
    gemini: GeminiClient,
}

impl RouterClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            openrouter: OpenRouterClient::new(timeout),
            gemini: GeminiClient::new(timeout),
        }
    }
}

#[async_trait]
impl LLMClient for RouterClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        match config.provider {
            LLMProvider::Gemini => self.gemini.generate(config, system, user).await,
            LLMProvider::OpenRouter | LLMProvider::OpenAI => {
                self.openrouter.generate(config, system, user).await
            }
        }
    }
}

/// Map a non-success status to the error kind the retry policy understands.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> crate::domain::error::AppError {
    use crate::domain::error::AppError;

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        AppError::LLMTransient(format!("Rate limited ({}): {}", status, body))
    } else {
        AppError::LLMError(format!("API error ({}): {}", status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;

    #[test]
    fn test_rate_limit_is_transient() {
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(err.is_transient());
    }

    #[test]
    fn test_other_statuses_are_fatal() {
        for status in [
            reqwest::StatusCode::UNAUTHORIZED,
            reqwest::StatusCode::BAD_REQUEST,
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(matches!(status_error(status, ""), AppError::LLMError(_)));
        }
    }
}
