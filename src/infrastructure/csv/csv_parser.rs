// ============================================================
// CSV ROW PARSER
// ============================================================
// Split raw delimited text into cell lists without judging them

use csv::{ReaderBuilder, Trim};
use tracing::warn;

use crate::domain::csv::RawRow;

/// Tolerant CSV tokenizer; rows come out with whatever cell count they had
pub struct CsvRowParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Quote character (default: double quote)
    quote: u8,
}

impl Default for CsvRowParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvRowParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazily parse `content` into raw rows.
    ///
    /// Quoted fields may span lines. An unterminated quote swallows the rest
    /// of the input into one field, which is the tokenizer's own recovery.
    /// Records the tokenizer cannot produce at all are logged and skipped.
    pub fn rows<'a>(&self, content: &'a str) -> impl Iterator<Item = RawRow> + 'a {
        let reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(content.as_bytes());

        reader
            .into_records()
            .enumerate()
            .filter_map(|(index, result)| match result {
                Ok(record) => Some(record.iter().map(str::to_string).collect()),
                Err(err) => {
                    warn!(record = index, error = %err, "Skipping unreadable CSV record");
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<RawRow> {
        CsvRowParser::new().rows(content).collect()
    }

    #[test]
    fn test_parse_simple_rows() {
        let rows = parse("a,b,c\nd,e,f");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_quoted_newline_stays_in_field() {
        let rows = parse("\"Login\",\"1. Abrir app\n2. Ingresar\",\"OK\"");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], "1. Abrir app\n2. Ingresar");
    }

    #[test]
    fn test_variable_length_rows_are_kept() {
        let rows = parse("a,b\nc,d,e,f,g,h,i");
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 7);
    }

    #[test]
    fn test_doubled_quotes_unescaped() {
        let rows = parse("\"Mensaje \"\"Error\"\" visible\",x");
        assert_eq!(rows[0][0], "Mensaje \"Error\" visible");
    }

    #[test]
    fn test_unterminated_quote_does_not_panic() {
        let rows = parse("\"abierto,b\nc,d");
        assert_eq!(rows.len(), 1);
        assert!(rows[0][0].starts_with("abierto"));
    }
}
