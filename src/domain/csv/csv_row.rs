// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures produced by the sanitation pipeline

use serde::{Deserialize, Serialize};

use super::{CaseType, Priority, HEADER};

/// One schema-conformant test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRow {
    pub title: String,
    pub preconditions: String,
    pub steps: String,
    pub expected_result: String,
    pub case_type: CaseType,
    pub priority: Priority,
}

impl TestCaseRow {
    /// Cells in header order
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.title,
            &self.preconditions,
            &self.steps,
            &self.expected_result,
            self.case_type.as_str(),
            self.priority.as_str(),
        ]
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.cells().iter().map(|cell| cell.to_string()).collect()
    }
}

/// Why a row needed its column count repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncompleteReason {
    /// Fewer cells than the header; padded with empty strings
    MissingColumns,
    /// More cells than the header; truncated to the first six
    ExtraColumns,
}

/// Row whose column count was repaired, kept for user review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteRow {
    /// Position of the record in the parsed stream (0-based)
    pub record_index: usize,

    /// Trimmed cells as they arrived, before padding or truncation
    pub cells: Vec<String>,

    pub reason: IncompleteReason,
}

/// Final ordered rows plus the fixed header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub rows: Vec<TestCaseRow>,
}

impl NormalizedTable {
    pub fn new(rows: Vec<TestCaseRow>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> [&'static str; 6] {
        HEADER
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCaseRow> {
        self.rows.iter()
    }
}

/// Row/column view of the emitted CSV, for human preview only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,

    /// Records that could not be read and were left out
    pub skipped_records: usize,
}

/// Everything the sanitation pipeline produces for one raw response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedCsv {
    /// Authoritative artifact: strictly quoted CSV with the fixed header
    pub csv_text: String,

    pub table: NormalizedTable,

    pub incomplete_rows: Vec<IncompleteRow>,

    /// Best-effort preview; `None` when it could not be built
    pub preview: Option<PreviewTable>,

    pub preview_warnings: Vec<String>,
}

impl SanitizedCsv {
    pub fn incomplete_count(&self) -> usize {
        self.incomplete_rows.len()
    }
}
