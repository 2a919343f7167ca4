// ============================================================
// CSV EMITTER
// ============================================================
// Serialize normalized rows as strictly quoted CSV

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::csv::{NormalizedTable, HEADER};
use crate::domain::error::{AppError, Result};

/// Write the fixed header followed by every row, all fields quoted,
/// embedded quotes doubled, CRLF line endings.
pub fn emit_csv(table: &NormalizedTable) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for (index, row) in table.iter().enumerate() {
        writer.write_record(row.cells()).map_err(|e| {
            AppError::Internal(format!("Failed to write CSV row {}: {}", index + 1, e))
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV writer: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("CSV output is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::{CaseType, Priority, TestCaseRow};

    fn row(title: &str, steps: &str) -> TestCaseRow {
        TestCaseRow {
            title: title.to_string(),
            preconditions: "Usuario registrado".to_string(),
            steps: steps.to_string(),
            expected_result: "Acceso concedido".to_string(),
            case_type: CaseType::Functional,
            priority: Priority::High,
        }
    }

    #[test]
    fn test_header_only_for_empty_table() {
        let csv = emit_csv(&NormalizedTable::default()).unwrap();
        assert_eq!(
            csv,
            "\"Title\",\"Preconditions\",\"Steps\",\"Expected Result\",\"Type\",\"Priority\"\r\n"
        );
    }

    #[test]
    fn test_every_field_quoted_and_quotes_doubled() {
        let table = NormalizedTable::new(vec![row("Ver \"Error\"", "1. Abrir\n2. Enviar")]);
        let csv = emit_csv(&table).unwrap();
        let body = csv.split_once("\r\n").unwrap().1;
        assert_eq!(
            body,
            "\"Ver \"\"Error\"\"\",\"Usuario registrado\",\"1. Abrir\n2. Enviar\",\"Acceso concedido\",\"Functional\",\"High\"\r\n"
        );
    }
}
