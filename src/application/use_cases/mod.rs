pub mod csv_sanitizer;
pub mod generate_cases;
pub mod prompt_engine;
pub mod refine;
pub mod row_normalizer;
