mod text_repair;

pub use text_repair::repair_text;

use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

static CODE_FENCE_LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z]*[ \t]*$\n?").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Replies the model gives when it has nothing useful to say.
const PLACEHOLDER_REPLIES: [&str; 5] = ["ninguno", "ninguna", "no aplica", "n/a", "no hay información"];

/// Cleans a free-text LLM reply (the refined description) of reasoning
/// tags, fence lines and runs of blank lines.
pub fn clean_llm_response(response: &str) -> String {
    let mut cleaned = response.replace("\r\n", "\n");

    cleaned = THINK_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = CODE_FENCE_LINE_PATTERN.replace_all(&cleaned, "").to_string();

    cleaned = cleaned.trim().to_string();

    MULTIPLE_NEWLINES_PATTERN
        .replace_all(&cleaned, "\n\n")
        .to_string()
}

/// Remove lines that only open or close a Markdown code fence
pub fn strip_code_fence_lines(text: &str) -> String {
    CODE_FENCE_LINE_PATTERN.replace_all(text, "").to_string()
}

/// True for an empty reply or one of the known "nothing here" answers
pub fn is_placeholder_reply(response: &str) -> bool {
    let normalized = response.trim().to_lowercase();
    normalized.is_empty() || PLACEHOLDER_REPLIES.contains(&normalized.as_str())
}
