// ============================================================
// ROW NORMALIZER
// ============================================================
// Per-row validation and repair of parsed model output

use tracing::debug;

use crate::domain::csv::{
    is_header_row, CaseType, IncompleteReason, IncompleteRow, Priority, RawRow, SanitizeConfig,
    TestCaseRow, COLUMN_COUNT, PRECONDITIONS_COLUMN, PRIORITY_COLUMN, TYPE_COLUMN,
};

const CODE_FENCE: &str = "```";

/// Why a parsed row was left out of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Blank,
    Header,
    CodeFence,
}

/// Result of normalizing one parsed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Dropped(DropReason),
    Accepted {
        row: TestCaseRow,
        incomplete: Option<IncompleteRow>,
    },
}

/// Accepted rows in input order plus the rows that needed column repair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRows {
    pub rows: Vec<TestCaseRow>,
    pub incomplete: Vec<IncompleteRow>,
    pub dropped: usize,
}

pub struct RowNormalizer<'a> {
    config: &'a SanitizeConfig,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(config: &'a SanitizeConfig) -> Self {
        Self { config }
    }

    /// Normalize every parsed row. Only blank, header and code-fence rows are
    /// dropped; everything else is repaired and kept.
    pub fn normalize<I>(&self, raw_rows: I) -> NormalizedRows
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut result = NormalizedRows::default();

        for (index, raw) in raw_rows.into_iter().enumerate() {
            match self.normalize_row(index, raw) {
                RowOutcome::Dropped(reason) => {
                    debug!(record = index, ?reason, "Dropping row");
                    result.dropped += 1;
                }
                RowOutcome::Accepted { row, incomplete } => {
                    if let Some(incomplete) = incomplete {
                        result.incomplete.push(incomplete);
                    }
                    result.rows.push(row);
                }
            }
        }

        result
    }

    pub fn normalize_row(&self, record_index: usize, raw: RawRow) -> RowOutcome {
        let mut cells: Vec<String> = raw.into_iter().map(|cell| cell.trim().to_string()).collect();

        if let Some(reason) = drop_reason(&cells) {
            return RowOutcome::Dropped(reason);
        }

        let incomplete = match cells.len() {
            n if n < COLUMN_COUNT => Some(IncompleteReason::MissingColumns),
            n if n > COLUMN_COUNT => Some(IncompleteReason::ExtraColumns),
            _ => None,
        }
        .map(|reason| IncompleteRow {
            record_index,
            cells: cells.clone(),
            reason,
        });

        cells.resize(COLUMN_COUNT, String::new());

        let case_type = CaseType::parse(&cells[TYPE_COLUMN]).unwrap_or_default();
        let priority = Priority::parse(&cells[PRIORITY_COLUMN]).unwrap_or_default();
        if cells[PRECONDITIONS_COLUMN].is_empty() {
            cells[PRECONDITIONS_COLUMN] = self.config.empty_precondition_placeholder.clone();
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        let row = TestCaseRow {
            title: next(),
            preconditions: next(),
            steps: next(),
            expected_result: next(),
            case_type,
            priority,
        };

        RowOutcome::Accepted { row, incomplete }
    }
}

fn drop_reason(cells: &[String]) -> Option<DropReason> {
    if cells.iter().all(|cell| cell.is_empty()) {
        Some(DropReason::Blank)
    } else if is_header_row(cells) {
        Some(DropReason::Header)
    } else if cells.iter().any(|cell| cell.contains(CODE_FENCE)) {
        Some(DropReason::CodeFence)
    } else {
        None
    }
}
