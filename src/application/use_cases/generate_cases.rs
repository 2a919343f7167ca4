use crate::application::use_cases::csv_sanitizer::CsvSanitizer;
use crate::application::use_cases::prompt_engine::PromptEngine;
use crate::application::use_cases::refine::RefineUseCase;
use crate::domain::csv::{SanitizeConfig, SanitizedCsv};
use crate::domain::description::FunctionalDescription;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::session::HistoryEntry;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Endpoint settings per stage; they differ only in token budget by default
#[derive(Debug, Clone)]
pub struct StageConfigs {
    pub refine: LLMConfig,
    pub generate: LLMConfig,
}

impl StageConfigs {
    pub fn new(base: &LLMConfig, refine_max_tokens: u32, generate_max_tokens: u32) -> Self {
        Self {
            refine: base.with_max_tokens(refine_max_tokens),
            generate: base.with_max_tokens(generate_max_tokens),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// `None` when refinement was skipped
    pub refined: Option<String>,
    pub raw_response: String,
    pub sanitized: SanitizedCsv,
}

impl GenerationOutcome {
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(
            self.sanitized.csv_text.clone(),
            self.sanitized.table.len(),
            self.sanitized.incomplete_count(),
        )
    }
}

/// Second stage plus the sequential refine -> generate flow
pub struct GenerateCasesUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    refine: RefineUseCase,
    sanitizer: CsvSanitizer,
}

impl GenerateCasesUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, sanitize_config: SanitizeConfig) -> Self {
        Self {
            refine: RefineUseCase::new(llm_client.clone()),
            llm_client,
            sanitizer: CsvSanitizer::new(sanitize_config),
        }
    }

    pub async fn refine(
        &self,
        config: &LLMConfig,
        description: &FunctionalDescription,
    ) -> Result<String> {
        self.refine.execute(config, description).await
    }

    /// One generation call on an already refined (or raw) description
    pub async fn generate(&self, config: &LLMConfig, description: &str) -> Result<GenerationOutcome> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::ValidationError(
                "Nothing to generate test cases from.".to_string(),
            ));
        }

        let user_prompt = PromptEngine::build_generate_prompt(description);
        let raw_response = self
            .llm_client
            .generate(config, PromptEngine::generate_system_prompt(), &user_prompt)
            .await?;

        let sanitized = self.sanitizer.sanitize(&raw_response)?;
        if sanitized.table.is_empty() {
            warn!("Model response contained no usable test case rows");
        }
        if sanitized.incomplete_count() > 0 {
            warn!(
                count = sanitized.incomplete_count(),
                "Rows with missing or extra columns were repaired"
            );
        }

        Ok(GenerationOutcome {
            refined: None,
            raw_response,
            sanitized,
        })
    }

    /// Refine (unless skipped), then generate. Generation never starts
    /// before refinement has succeeded.
    pub async fn execute(
        &self,
        configs: &StageConfigs,
        description: &FunctionalDescription,
        skip_refine: bool,
    ) -> Result<GenerationOutcome> {
        let refined = if skip_refine {
            None
        } else {
            Some(self.refine(&configs.refine, description).await?)
        };

        let source = refined.as_deref().unwrap_or(description.as_str());
        let mut outcome = self.generate(&configs.generate, source).await?;
        outcome.refined = refined;

        info!(
            rows = outcome.sanitized.table.len(),
            refined = outcome.refined.is_some(),
            "Test cases generated"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm_clients::fake::ScriptedClient;

    fn configs() -> StageConfigs {
        StageConfigs::new(&LLMConfig::default(), 800, 1500)
    }

    #[test]
    fn test_stage_configs_differ_in_budget_only() {
        let configs = configs();
        assert_eq!(configs.refine.max_tokens, Some(800));
        assert_eq!(configs.generate.max_tokens, Some(1500));
        assert_eq!(configs.refine.model, configs.generate.model);
    }

    #[tokio::test]
    async fn test_refine_then_generate() {
        let fake = Arc::new(ScriptedClient::new(vec![
            Ok("- Regla A\n- Regla B".to_string()),
            Ok("```csv\n\"Title\",\"Preconditions\",\"Steps\",\"Expected Result\",\"Type\",\"Priority\"\n\"Caso\",\"\",\"1. Paso\",\"Ok\",\"Negative\",\"Alta\"\n```".to_string()),
        ]));
        let use_case = GenerateCasesUseCase::new(fake.clone(), SanitizeConfig::default());
        let description = FunctionalDescription::parse("Pantalla de login").unwrap();

        let outcome = use_case.execute(&configs(), &description, false).await.unwrap();

        assert_eq!(outcome.refined.as_deref(), Some("- Regla A\n- Regla B"));
        assert_eq!(outcome.sanitized.table.len(), 1);
        let row = &outcome.sanitized.table.rows[0];
        assert_eq!(row.case_type.as_str(), "Negative");
        assert_eq!(row.priority.as_str(), "Medium");

        let prompts = fake.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].ends_with("Pantalla de login"));
        assert!(prompts[1].ends_with("- Regla A\n- Regla B"));

        let entry = outcome.history_entry();
        assert_eq!(entry.row_count, 1);
        assert_eq!(entry.incomplete_count, 0);
    }

    #[tokio::test]
    async fn test_skip_refine_sends_description_directly() {
        let fake = Arc::new(ScriptedClient::new(vec![Ok("a,b,c".to_string())]));
        let use_case = GenerateCasesUseCase::new(fake.clone(), SanitizeConfig::default());
        let description = FunctionalDescription::parse("Carrito de compras").unwrap();

        let outcome = use_case.execute(&configs(), &description, true).await.unwrap();

        assert!(outcome.refined.is_none());
        assert_eq!(fake.calls(), 1);
        assert!(fake.prompts()[0].ends_with("Carrito de compras"));
        assert_eq!(outcome.sanitized.incomplete_count(), 1);
    }

    #[tokio::test]
    async fn test_refine_failure_blocks_generation() {
        let fake = Arc::new(ScriptedClient::new(vec![
            Err(AppError::LLMError("API error (401)".to_string())),
            Ok("never used".to_string()),
        ]));
        let use_case = GenerateCasesUseCase::new(fake.clone(), SanitizeConfig::default());
        let description = FunctionalDescription::parse("Algo").unwrap();

        let err = use_case.execute(&configs(), &description, false).await.unwrap_err();

        assert!(matches!(err, AppError::LLMError(_)));
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_refined_text_rejected_without_call() {
        let fake = Arc::new(ScriptedClient::new(vec![]));
        let use_case = GenerateCasesUseCase::new(fake.clone(), SanitizeConfig::default());

        let err = use_case.generate(&LLMConfig::default(), "  ").await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(fake.calls(), 0);
    }
}
