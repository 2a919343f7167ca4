use serde::{Deserialize, Serialize};
use validator::Validate;

/// Free-text functional description supplied by the user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FunctionalDescription {
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
}

impl FunctionalDescription {
    /// Trims the input and validates it; blank text is rejected
    pub fn parse(content: &str) -> crate::domain::error::Result<Self> {
        let description = Self {
            content: content.trim().to_string(),
        };
        description.validate()?;
        Ok(description)
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
