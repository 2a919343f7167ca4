use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::domain::csv::SanitizeConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use crate::domain::retry_policy::RetryPolicy;
use crate::infrastructure::security::keyring::KeyringManager;

pub const DEFAULT_CONFIG_FILE: &str = "casegen.toml";
pub const ENV_PREFIX: &str = "CASEGEN_";
const KEYRING_SERVICE: &str = "casegen";

/// Settings merged from defaults, `casegen.toml` and `CASEGEN_*` variables
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub provider: LLMProvider,
    /// Falls back to the provider's public endpoint
    pub base_url: Option<String>,
    /// Falls back to the provider's default model
    pub model: Option<String>,
    pub api_key: Option<String>,
    #[validate(range(min = 1, max = 32000))]
    pub refine_max_tokens: u32,
    #[validate(range(min = 1, max = 32000))]
    pub generate_max_tokens: u32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
    #[validate(nested)]
    pub retry: RetryPolicy,
    pub output_dir: PathBuf,
    pub write_bom: bool,
    #[validate(nested)]
    pub sanitize: SanitizeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenRouter,
            base_url: None,
            model: None,
            api_key: None,
            refine_max_tokens: 800,
            generate_max_tokens: 1500,
            temperature: None,
            timeout_secs: 120,
            retry: RetryPolicy::default(),
            output_dir: PathBuf::from("."),
            write_bom: true,
            sanitize: SanitizeConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Endpoint settings for one call, without the key resolved
    pub fn llm_config(&self, api_key: Option<String>) -> LLMConfig {
        LLMConfig {
            provider: self.provider,
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| self.provider.default_base_url().to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| self.provider.default_model().to_string()),
            api_key,
            max_tokens: Some(self.generate_max_tokens),
            temperature: self.temperature,
        }
    }
}

pub struct ConfigService {
    keyring: KeyringManager,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            keyring: KeyringManager::new(KEYRING_SERVICE),
        }
    }

    /// Layer defaults, the TOML file (explicit path or `casegen.toml` in the
    /// working directory, missing file is fine) and environment variables.
    /// Nested keys use a double underscore: `CASEGEN_RETRY__MAX_ATTEMPTS=5`.
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if path.is_some() && !file.exists() {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                file.display()
            )));
        }

        let config: AppConfig = Self::figment(&file)
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        debug!(provider = %config.provider, file = %file.display(), "Configuration loaded");
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Configured key, then the provider's conventional variable, then the keyring
    pub fn resolve_api_key(&self, config: &AppConfig) -> Result<String> {
        let provider = config.provider;
        let from_env = || std::env::var(provider.api_key_env_var()).ok();

        if let Some(key) = config
            .api_key
            .clone()
            .or_else(from_env)
            .filter(|key| !key.trim().is_empty())
        {
            return Ok(key.trim().to_string());
        }

        self.keyring.get_api_key(provider)?.ok_or_else(|| {
            AppError::ConfigError(format!(
                "No API key for {}: set CASEGEN_API_KEY or {}, or run `casegen auth set`",
                provider,
                provider.api_key_env_var()
            ))
        })
    }

    pub fn save_api_key(&self, provider: LLMProvider, key: &str) -> Result<()> {
        self.keyring.set_api_key(provider, key)
    }

    pub fn delete_api_key(&self, provider: LLMProvider) -> Result<()> {
        self.keyring.delete_api_key(provider)
    }
}
