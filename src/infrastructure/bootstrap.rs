use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error};

use crate::application::use_cases::generate_cases::{GenerateCasesUseCase, StageConfigs};
use crate::domain::error::Result;
use crate::domain::llm_config::LLMProvider;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::llm_clients::{LLMClient, RetryingClient, RouterClient};
use crate::interfaces::cli::AppState;

/// Values given on the command line that win over every config layer
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<LLMProvider>,
    pub model: Option<String>,
}

pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig> {
    let mut config = ConfigService::load(path).map_err(|err| {
        error!(error = %err, "Failed to load configuration");
        err
    })?;

    if let Some(provider) = overrides.provider {
        if provider != config.provider {
            // A configured endpoint belongs to the configured provider.
            config.base_url = None;
            config.model = None;
            config.api_key = None;
        }
        config.provider = provider;
    }
    if let Some(model) = overrides.model.clone() {
        config.model = Some(model);
    }
    Ok(config)
}

/// Provider router wrapped in the configured retry policy
pub fn build_llm_client(config: &AppConfig) -> Arc<dyn LLMClient + Send + Sync> {
    let router: Arc<dyn LLMClient + Send + Sync> = Arc::new(RouterClient::new(config.timeout()));
    Arc::new(RetryingClient::new(router, config.retry.clone()))
}

pub fn setup(config: AppConfig) -> Result<AppState> {
    let api_key = ConfigService::new().resolve_api_key(&config)?;
    setup_with_client(config, api_key, |config| build_llm_client(config))
}

/// Wires the pipeline around a given client; the key is already resolved
pub fn setup_with_client<F>(config: AppConfig, api_key: String, make_client: F) -> Result<AppState>
where
    F: FnOnce(&AppConfig) -> Arc<dyn LLMClient + Send + Sync>,
{
    let base = config.llm_config(Some(api_key));
    let stages = StageConfigs::new(&base, config.refine_max_tokens, config.generate_max_tokens);
    let generator = GenerateCasesUseCase::new(make_client(&config), config.sanitize.clone());

    debug!(
        provider = %base.provider,
        model = %base.model,
        max_attempts = config.retry.max_attempts,
        "LLM pipeline ready"
    );

    Ok(AppState {
        config,
        stages,
        generator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm_clients::fake::ScriptedClient;

    #[test]
    fn test_provider_override_resets_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"provider = \"open_router\"\nbase_url = \"http://localhost:9999\"\nmodel = \"custom\"\n",
        )
        .unwrap();

        let overrides = Overrides {
            provider: Some(LLMProvider::Gemini),
            model: None,
        };
        let config = load_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.provider, LLMProvider::Gemini);
        assert!(config.base_url.is_none());

        let llm = config.llm_config(None);
        assert_eq!(llm.model, LLMProvider::Gemini.default_model());
    }

    #[test]
    fn test_model_override_keeps_provider() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"provider = \"gemini\"\n").unwrap();

        let overrides = Overrides {
            provider: None,
            model: Some("gemini-1.5-pro".to_string()),
        };
        let config = load_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.provider, LLMProvider::Gemini);
        assert_eq!(config.model.as_deref(), Some("gemini-1.5-pro"));
    }

    #[test]
    fn test_setup_with_client_builds_stage_budgets() {
        let config = AppConfig::default();
        let state = setup_with_client(config, "key".to_string(), |_| {
            Arc::new(ScriptedClient::new(vec![]))
        })
        .unwrap();

        assert_eq!(state.stages.refine.max_tokens, Some(800));
        assert_eq!(state.stages.generate.max_tokens, Some(1500));
        assert_eq!(state.stages.generate.api_key.as_deref(), Some("key"));
    }
}
