pub mod description;
pub mod error;
pub mod llm_config;
pub mod retry_policy;
pub mod session;

// Test-case CSV schema
pub mod csv;
