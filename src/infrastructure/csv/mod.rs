// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Tokenizing, emitting and previewing test-case CSV

mod csv_parser;
mod csv_writer;
mod table_reader;

pub use csv_parser::CsvRowParser;
pub use csv_writer::emit_csv;
pub use table_reader::read_preview;
