use super::{status_error, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: String,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
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
            .ok_or_else(|| AppError::LLMError("Missing API key for Gemini".to_string()))
    }

    fn request_body(config: &LLMConfig, system: &str, user: &str) -> GeminiRequest {
        // generateContent has no system role in v1beta; both go in as parts
        let parts = [system, user]
            .into_iter()
            .filter(|text| !text.trim().is_empty())
            .map(|text| GeminiPart {
                text: text.to_string(),
            })
            .collect();

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
            generation_config: Some(GenerationConfig {
                temperature: config.temperature.map(f64::from),
                max_output_tokens: config.max_tokens,
            }),
        }
    }

    fn first_text(response: GeminiResponse) -> Result<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let base_url = config.base_url.trim_end_matches('/');
        let model_id = config.model.trim();
        let url = format!("{}/{}:generateContent", base_url, model_id);

        debug!(model = %model_id, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&Self::request_body(config, system, user))
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        Self::first_text(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMProvider;

    #[test]
    fn test_request_body_skips_blank_system() {
        let config = LLMConfig {
            provider: LLMProvider::Gemini,
            max_tokens: Some(1500),
            ..Default::default()
        };
        let body = serde_json::to_value(GeminiClient::request_body(&config, " ", "Texto")).unwrap();
        assert_eq!(body["contents"][0]["parts"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1500);
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_first_text_path() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":" hola "}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::first_text(response).unwrap(), "hola");

        let empty: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(GeminiClient::first_text(empty).is_err());
    }
}
