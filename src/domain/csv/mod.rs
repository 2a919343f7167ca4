// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for test-case CSV sanitation
// No I/O, no async, no external dependencies

mod csv_row;
mod sanitize_config;
mod schema;

pub use csv_row::{
    IncompleteReason, IncompleteRow, NormalizedTable, PreviewTable, SanitizedCsv, TestCaseRow,
};
pub use sanitize_config::{SanitizeConfig, EMPTY_PRECONDITION_PLACEHOLDER};
pub use schema::{
    is_header_row, CaseType, Priority, COLUMN_COUNT, HEADER, PRECONDITIONS_COLUMN,
    PRIORITY_COLUMN, TYPE_COLUMN,
};

/// Raw cell list straight from the parser; length not yet normalized
pub type RawRow = Vec<String>;
