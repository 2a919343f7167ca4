use crate::application::use_cases::prompt_engine::PromptEngine;
use crate::domain::description::FunctionalDescription;
use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::{clean_llm_response, repair_text};
use std::sync::Arc;
use tracing::info;

/// First stage: free text in, explicit list of QA conditions out
pub struct RefineUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl RefineUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(
        &self,
        config: &LLMConfig,
        description: &FunctionalDescription,
    ) -> Result<String> {
        let user_prompt = PromptEngine::build_refine_prompt(description.as_str());

        let raw_result = self
            .llm_client
            .generate(config, PromptEngine::refine_system_prompt(), &user_prompt)
            .await?;

        let refined = clean_llm_response(&repair_text(&raw_result));
        info!(chars = refined.len(), "Description refined");

        Ok(refined)
    }
}
