use crate::application::use_cases::generate_cases::{GenerateCasesUseCase, StageConfigs};
use crate::infrastructure::config::AppConfig;

/// Everything a command needs once configuration and credentials are resolved
pub struct AppState {
    pub config: AppConfig,
    pub stages: StageConfigs,
    pub generator: GenerateCasesUseCase,
}
