use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMProvider;
use keyring::Entry;

/// API keys kept in the OS credential store, one entry per provider
pub struct KeyringManager {
    service: String,
}

impl KeyringManager {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, provider: LLMProvider) -> Result<Entry> {
        Entry::new(&self.service, provider.key_name())
            .map_err(|e| AppError::SecurityError(format!("Failed to create entry: {}", e)))
    }

    pub fn set_api_key(&self, provider: LLMProvider, secret: &str) -> Result<()> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(AppError::ValidationError("API key must not be empty".to_string()));
        }

        self.entry(provider)?
            .set_password(secret)
            .map_err(|e| AppError::SecurityError(format!("Failed to store API key: {}", e)))
    }

    /// `Ok(None)` when nothing is stored for the provider
    pub fn get_api_key(&self, provider: LLMProvider) -> Result<Option<String>> {
        match self.entry(provider)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to read API key: {}",
                e
            ))),
        }
    }

    pub fn delete_api_key(&self, provider: LLMProvider) -> Result<()> {
        match self.entry(provider)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to delete API key: {}",
                e
            ))),
        }
    }
}
