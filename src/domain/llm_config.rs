use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LLMProvider {
    OpenRouter,
    #[serde(rename = "openai")]
    OpenAI,
    Gemini,
}

impl LLMProvider {
    /// Name used for the keyring account and provider-specific env var.
    pub fn key_name(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => "openrouter",
            LLMProvider::OpenAI => "openai",
            LLMProvider::Gemini => "gemini",
        }
    }

    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => "OPENROUTER_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
            LLMProvider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => "https://openrouter.ai/api/v1",
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => "openai/gpt-3.5-turbo",
            LLMProvider::OpenAI => "gpt-3.5-turbo",
            LLMProvider::Gemini => "gemini-2.0-flash",
        }
    }
}

impl fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LLMConfig {
    /// Same endpoint and credentials, different completion budget.
    pub fn with_max_tokens(&self, max_tokens: u32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            ..self.clone()
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenRouter,
            base_url: LLMProvider::OpenRouter.default_base_url().to_string(),
            model: "openai/gpt-3.5-turbo".to_string(),
            api_key: None,
            max_tokens: Some(1500),
            temperature: None,
        }
    }
}
