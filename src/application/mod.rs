pub mod use_cases;

pub use use_cases::csv_sanitizer::CsvSanitizer;
pub use use_cases::generate_cases::{GenerateCasesUseCase, GenerationOutcome, StageConfigs};
pub use use_cases::refine::RefineUseCase;
