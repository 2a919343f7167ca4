// ============================================================
// PREVIEW TABLE READER
// ============================================================
// Best-effort row/column view of emitted CSV for display

use csv::ReaderBuilder;
use tracing::warn;

use crate::domain::csv::{PreviewTable, HEADER};
use crate::domain::error::{AppError, Result};

/// Parse CSV text with a header line into a preview table.
///
/// Records whose length differs from the header are skipped and reported in
/// the returned warnings. Only the known columns are projected, in header
/// order. Fails only when no header can be read at all.
pub fn read_preview(csv_text: &str) -> Result<(PreviewTable, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    let projection: Vec<(usize, String)> = HEADER
        .iter()
        .filter_map(|name| {
            headers
                .iter()
                .position(|header| header.trim() == *name)
                .map(|idx| (idx, name.to_string()))
        })
        .collect();

    if projection.is_empty() {
        return Err(AppError::ParseError(
            "CSV header has none of the expected columns".to_string(),
        ));
    }

    let mut table = PreviewTable {
        headers: projection.iter().map(|(_, name)| name.clone()).collect(),
        ..Default::default()
    };
    let mut warnings = Vec::new();

    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let cells = projection
                    .iter()
                    .map(|(idx, _)| record.get(*idx).unwrap_or("").to_string())
                    .collect();
                table.rows.push(cells);
            }
            Err(err) => {
                warn!(record = index + 1, error = %err, "Skipping bad CSV line in preview");
                warnings.push(format!("Skipped record {}: {}", index + 1, err));
                table.skipped_records += 1;
            }
        }
    }

    Ok((table, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_well_formed_csv() {
        let csv = "\"Title\",\"Preconditions\",\"Steps\",\"Expected Result\",\"Type\",\"Priority\"\r\n\
                   \"A\",\"B\",\"1. x\n2. y\",\"D\",\"Functional\",\"Low\"\r\n";
        let (table, warnings) = read_preview(csv).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows, vec![vec!["A", "B", "1. x\n2. y", "D", "Functional", "Low"]]);
    }

    #[test]
    fn test_skips_bad_lines_with_warning() {
        let csv = "Title,Preconditions,Steps,Expected Result,Type,Priority\n\
                   a,b,c,d,Functional,High\n\
                   broken,line\n\
                   e,f,g,h,Negative,Low\n";
        let (table, warnings) = read_preview(csv).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_records, 1);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_projects_known_columns_only() {
        let csv = "Id,Title,Priority\n1,Login,High\n";
        let (table, _) = read_preview(csv).unwrap();
        assert_eq!(table.headers, vec!["Title", "Priority"]);
        assert_eq!(table.rows, vec![vec!["Login", "High"]]);
    }

    #[test]
    fn test_unknown_header_fails() {
        assert!(read_preview("foo,bar\n1,2\n").is_err());
    }
}
