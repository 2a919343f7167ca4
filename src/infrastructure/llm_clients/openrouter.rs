use super::{status_error, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Chat-completions client for OpenRouter and other OpenAI-compatible endpoints
pub struct OpenRouterClient {
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_key(config: &LLMConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .ok_or_else(|| AppError::LLMError(format!("Missing API key for {}", config.provider)))
    }

    fn completions_url(base_url: &str) -> String {
        if base_url.ends_with('/') {
            format!("{}chat/completions", base_url)
        } else {
            format!("{}/chat/completions", base_url)
        }
    }

    pub(crate) fn request_body(config: &LLMConfig, system: &str, user: &str) -> serde_json::Value {
        let mut body = json!({
            "model": config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": user
                }
            ],
            "max_tokens": config.max_tokens,
        });
        if let Some(temperature) = config.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    pub(crate) fn extract_content(json: &serde_json::Value) -> Result<String> {
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenRouterClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = Self::completions_url(&config.base_url);
        let body = Self::request_body(config, system, user);

        debug!(model = %config.model, url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        Self::extract_content(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMProvider;

    fn config() -> LLMConfig {
        LLMConfig {
            provider: LLMProvider::OpenRouter,
            base_url: "https://openrouter.ai/api/v1/".to_string(),
            model: "openai/gpt-3.5-turbo".to_string(),
            api_key: None,
            max_tokens: Some(800),
            temperature: None,
        }
    }

    #[test]
    fn test_url_join() {
        assert_eq!(
            OpenRouterClient::completions_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            OpenRouterClient::completions_url("http://localhost:1234/v1"),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = OpenRouterClient::request_body(&config(), "sys", "usr");
        assert_eq!(body["model"], "openai/gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "usr");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_extract_content() {
        let json = json!({"choices": [{"message": {"content": "  \"Title\"\n "}}]});
        assert_eq!(OpenRouterClient::extract_content(&json).unwrap(), "\"Title\"");
        assert!(OpenRouterClient::extract_content(&json!({"choices": []})).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_is_fatal() {
        let client = OpenRouterClient::new(Duration::from_secs(1));
        let err = client.generate(&config(), "s", "u").await.unwrap_err();
        assert!(matches!(err, AppError::LLMError(_)));
    }
}
