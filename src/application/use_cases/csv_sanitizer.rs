// ============================================================
// CSV SANITIZER USE CASE
// ============================================================
// Raw model text -> repaired, normalized, strictly quoted CSV

use tracing::{info, warn};

use crate::application::use_cases::row_normalizer::RowNormalizer;
use crate::domain::csv::{NormalizedTable, SanitizeConfig, SanitizedCsv};
use crate::domain::error::Result;
use crate::infrastructure::csv::{emit_csv, read_preview, CsvRowParser};
use crate::infrastructure::response::{repair_text, strip_code_fence_lines};

/// Stateless pipeline: text repair, parse, normalize, emit, preview
pub struct CsvSanitizer {
    config: SanitizeConfig,
    parser: CsvRowParser,
}

impl CsvSanitizer {
    pub fn new(config: SanitizeConfig) -> Self {
        Self {
            config,
            parser: CsvRowParser::new(),
        }
    }

    /// Sanitize one raw response. Row-level problems are always repaired or
    /// dropped; a failed preview only adds a warning.
    pub fn sanitize(&self, raw_response: &str) -> Result<SanitizedCsv> {
        let prepared = self.prepare(raw_response);

        let normalized = RowNormalizer::new(&self.config).normalize(self.parser.rows(&prepared));
        let table = NormalizedTable::new(normalized.rows);
        let csv_text = emit_csv(&table)?;

        info!(
            rows = table.len(),
            incomplete = normalized.incomplete.len(),
            dropped = normalized.dropped,
            "CSV sanitized"
        );

        let (preview, preview_warnings) = if self.config.build_preview {
            match read_preview(&csv_text) {
                Ok((preview, warnings)) => (Some(preview), warnings),
                Err(err) => {
                    warn!(error = %err, "Preview table could not be built");
                    (None, vec![err.to_string()])
                }
            }
        } else {
            (None, Vec::new())
        };

        Ok(SanitizedCsv {
            csv_text,
            table,
            incomplete_rows: normalized.incomplete,
            preview,
            preview_warnings,
        })
    }

    /// Encoding repair, line endings, escaped newlines and fence lines.
    /// Fences go before parsing so an unclosed quote cannot swallow them.
    fn prepare(&self, raw_response: &str) -> String {
        let repaired = repair_text(raw_response);
        let mut text = repaired.trim().replace("\r\n", "\n");
        if self.config.expand_escaped_newlines {
            text = expand_escaped_newlines(&text);
        }
        strip_code_fence_lines(&text).trim().to_string()
    }
}

/// `\n` becomes a newline; an escaped backslash (`\\`) is copied as-is so
/// the `n` after it survives.
fn expand_escaped_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('\\') => {
                chars.next();
                out.push_str("\\\\");
            }
            _ => out.push(c),
        }
    }
    out
}

impl Default for CsvSanitizer {
    fn default() -> Self {
        Self::new(SanitizeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::{
        CaseType, IncompleteReason, Priority, EMPTY_PRECONDITION_PLACEHOLDER, HEADER,
    };

    const HEADER_LINE: &str =
        "\"Title\",\"Preconditions\",\"Steps\",\"Expected Result\",\"Type\",\"Priority\"\r\n";

    #[test]
    fn test_fenced_response_with_duplicate_header() {
        let raw = "```csv\n\
                   \"Title\",\"Preconditions\",\"Steps\",\"Expected Result\",\"Type\",\"Priority\"\n\
                   \"Login válido\",\"Usuario registrado\",\"1. Abrir app\n2. Ingresar datos\",\"Acceso\",\"Functional\",\"High\"\n\
                   title,preconditions,steps,expected result,type,priority\n\
                   ```";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();

        assert_eq!(result.table.len(), 1);
        assert_eq!(result.table.rows[0].steps, "1. Abrir app\n2. Ingresar datos");
        assert_eq!(result.csv_text.matches("\"Title\"").count(), 1);
        assert!(result.csv_text.starts_with(HEADER_LINE));
        assert!(result.incomplete_rows.is_empty());
    }

    #[test]
    fn test_mojibake_repaired_before_parsing() {
        let raw = "\"Cambiar contraseÃ±a\",\"SesiÃ³n iniciada\",\"1. Ir a perfil\",\"ContraseÃ±a actualizada\",\"Functional\",\"Low\"";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();
        assert_eq!(result.table.rows[0].title, "Cambiar contraseña");
        assert_eq!(result.table.rows[0].preconditions, "Sesión iniciada");
        assert!(result.csv_text.contains("contraseña"));
    }

    #[test]
    fn test_escaped_newlines_expanded() {
        let raw = r#""T","P","1. Abrir\n2. Cerrar","E","Functional","Low""#;
        let result = CsvSanitizer::default().sanitize(raw).unwrap();
        assert_eq!(result.table.rows[0].steps, "1. Abrir\n2. Cerrar");

        let verbatim = CsvSanitizer::new(SanitizeConfig::verbatim()).sanitize(raw).unwrap();
        assert_eq!(verbatim.table.rows[0].steps, "1. Abrir\\n2. Cerrar");
    }

    #[test]
    fn test_escaped_backslash_is_not_a_newline() {
        let raw = r#""Abrir C:\\nuevo","P","1. a\n2. b","E","Functional","Low""#;
        let result = CsvSanitizer::default().sanitize(raw).unwrap();
        assert_eq!(result.table.rows[0].title, r"Abrir C:\\nuevo");
        assert_eq!(result.table.rows[0].steps, "1. a\n2. b");
        assert_eq!(expand_escaped_newlines(r"x\y"), r"x\y");
        assert_eq!(expand_escaped_newlines("fin\\"), "fin\\");
    }

    #[test]
    fn test_unclosed_last_quote_keeps_row_before_closing_fence() {
        let raw = "```csv\n\
                   \"Title\",\"Preconditions\",\"Steps\",\"Expected Result\",\"Type\",\"Priority\"\n\
                   \"Login\",\"User\",\"1. Open\",\"OK\",\"Functional\",\"High\n\
                   ```";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();

        assert_eq!(result.table.len(), 1);
        let row = &result.table.rows[0];
        assert_eq!(row.title, "Login");
        assert_eq!(row.priority, Priority::High);
        assert!(!result.csv_text.contains("```"));
    }

    #[test]
    fn test_header_with_trailing_comma_is_dropped() {
        let raw = "Title,Preconditions,Steps,Expected Result,Type,Priority,\n\
                   a,b,c,d,Functional,High";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();
        assert_eq!(result.table.len(), 1);
        assert_eq!(result.table.rows[0].title, "a");
        assert!(result.incomplete_rows.is_empty());
    }

    #[test]
    fn test_every_output_row_satisfies_schema() {
        let raw = "a,b\n\
                   c,,d,e,Bogus,Critical\n\
                   f,g,h,i,Security,low,extra\n\
                   ,,,\n\
                   j";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();

        assert_eq!(result.table.len(), 4);
        for row in result.table.iter() {
            assert!(CaseType::ALL.contains(&row.case_type));
            assert!(Priority::ALL.contains(&row.priority));
            assert!(!row.preconditions.is_empty());
            assert!(!row.preconditions.eq_ignore_ascii_case("n/a"));
            assert!(!row.preconditions.eq_ignore_ascii_case("ninguna"));
        }
        assert_eq!(result.table.rows[1].preconditions, EMPTY_PRECONDITION_PLACEHOLDER);

        let reasons: Vec<IncompleteReason> =
            result.incomplete_rows.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![
                IncompleteReason::MissingColumns,
                IncompleteReason::ExtraColumns,
                IncompleteReason::MissingColumns
            ]
        );
    }

    #[test]
    fn test_emitted_csv_reparses_to_same_cells() {
        let raw = "\"Ver \"\"Error\"\" en pantalla\",\"Usuario, activo\",\"1. Paso\n2. Paso\",\"Mensaje\",\"Negative\",\"High\"\n\
                   \"Otro\",\"\",\"s\",\"e\",\"x\",\"y\"";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();

        let reparsed: Vec<Vec<String>> = CsvRowParser::new().rows(&result.csv_text).collect();
        assert_eq!(reparsed[0], HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>());
        let expected: Vec<Vec<String>> = result.table.iter().map(|r| r.to_vec()).collect();
        assert_eq!(&reparsed[1..], expected.as_slice());
    }

    #[test]
    fn test_sanitizing_emitted_csv_is_stable() {
        let raw = "x,,1. a\n2. b,y,Performance,Low\nz";
        let sanitizer = CsvSanitizer::new(SanitizeConfig::verbatim());
        let first = sanitizer.sanitize(raw).unwrap();
        let second = sanitizer.sanitize(&first.csv_text).unwrap();
        assert_eq!(first.csv_text, second.csv_text);
        assert!(second.incomplete_rows.is_empty());
    }

    #[test]
    fn test_preview_matches_table() {
        let raw = "\"A\",\"B\",\"C\",\"D\",\"Usability\",\"Medium\"";
        let result = CsvSanitizer::default().sanitize(raw).unwrap();
        let preview = result.preview.expect("preview should be built");
        assert_eq!(preview.headers, HEADER.to_vec());
        assert_eq!(preview.rows, vec![vec!["A", "B", "C", "D", "Usability", "Medium"]]);
        assert!(result.preview_warnings.is_empty());
    }

    #[test]
    fn test_empty_response_yields_header_only() {
        let result = CsvSanitizer::default().sanitize("   ").unwrap();
        assert!(result.table.is_empty());
        assert_eq!(result.csv_text, HEADER_LINE);
        assert_eq!(result.preview.map(|p| p.rows.len()), Some(0));
    }
}
