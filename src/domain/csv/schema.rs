// ============================================================
// TEST CASE SCHEMA
// ============================================================
// Fixed import header and the closed value sets for Type and Priority

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the import format, in positional order
pub const HEADER: [&str; 6] = [
    "Title",
    "Preconditions",
    "Steps",
    "Expected Result",
    "Type",
    "Priority",
];

/// Number of cells every normalized row carries
pub const COLUMN_COUNT: usize = HEADER.len();

pub const TYPE_COLUMN: usize = 4;
pub const PRIORITY_COLUMN: usize = 5;
pub const PRECONDITIONS_COLUMN: usize = 1;

/// Kind of test case accepted by the import tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CaseType {
    #[default]
    Functional,
    Negative,
    Performance,
    Security,
    Usability,
}

impl CaseType {
    pub const ALL: [CaseType; 5] = [
        CaseType::Functional,
        CaseType::Negative,
        CaseType::Performance,
        CaseType::Security,
        CaseType::Usability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Functional => "Functional",
            CaseType::Negative => "Negative",
            CaseType::Performance => "Performance",
            CaseType::Security => "Security",
            CaseType::Usability => "Usability",
        }
    }

    /// Match a cell against the closed set, ignoring letter case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution priority accepted by the import tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the cells spell out the header, ignoring case, surrounding
/// whitespace and trailing empty cells (`Title,...,Priority,`)
pub fn is_header_row(cells: &[String]) -> bool {
    let used = cells
        .iter()
        .rposition(|cell| !cell.trim().is_empty())
        .map_or(0, |last| last + 1);
    let cells = &cells[..used];

    cells.len() == COLUMN_COUNT
        && cells
            .iter()
            .zip(HEADER.iter())
            .all(|(cell, name)| cell.trim().eq_ignore_ascii_case(name))
}
