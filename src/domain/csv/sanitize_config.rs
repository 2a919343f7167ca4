// ============================================================
// SANITIZE CONFIGURATION
// ============================================================
// Knobs for turning raw model output into importable CSV

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Text written into an empty Preconditions cell so a reviewer notices it
pub const EMPTY_PRECONDITION_PLACEHOLDER: &str = "Revisar precondición (vacía)";

/// Values an import tool treats as "no precondition"
const FORBIDDEN_PLACEHOLDERS: [&str; 2] = ["n/a", "ninguna"];

/// Configuration for CSV sanitation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SanitizeConfig {
    /// Replacement for blank Preconditions (default: "Revisar precondición (vacía)")
    #[validate(custom(function = "validate_placeholder"))]
    pub empty_precondition_placeholder: String,

    /// Turn literal `\n` escape pairs into real newlines before parsing (default: true)
    pub expand_escaped_newlines: bool,

    /// Build the tabular preview after emitting (default: true)
    pub build_preview: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            empty_precondition_placeholder: EMPTY_PRECONDITION_PLACEHOLDER.to_string(),
            expand_escaped_newlines: true,
            build_preview: true,
        }
    }
}

impl SanitizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave escaped newlines untouched, e.g. when re-sanitizing emitted CSV
    pub fn verbatim() -> Self {
        Self {
            expand_escaped_newlines: false,
            ..Default::default()
        }
    }
}

fn validate_placeholder(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new("blank_placeholder"));
    }
    if FORBIDDEN_PLACEHOLDERS
        .iter()
        .any(|forbidden| value.eq_ignore_ascii_case(forbidden))
    {
        return Err(ValidationError::new("forbidden_placeholder"));
    }
    Ok(())
}
