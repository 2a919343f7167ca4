use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::session::HistoryEntry;

const UTF8_BOM: &str = "\u{feff}";

/// File name for a generated artifact, e.g. `casos_qa_2024-05-01_10-30-00.csv`
pub fn artifact_file_name(stamp: &str) -> String {
    format!("casos_qa_{}.csv", stamp)
}

/// Bytes of the CSV artifact, optionally prefixed with a UTF-8 BOM so
/// spreadsheet tools pick the right encoding.
pub fn artifact_bytes(csv: &str, with_bom: bool) -> Vec<u8> {
    let mut content = String::with_capacity(csv.len() + UTF8_BOM.len());
    if with_bom {
        content.push_str(UTF8_BOM);
    }
    content.push_str(csv);
    content.into_bytes()
}

pub fn write_csv_artifact(output_dir: &Path, entry: &HistoryEntry, with_bom: bool) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(artifact_file_name(&entry.file_stamp()));
    fs::write(&path, artifact_bytes(&entry.csv, with_bom)).map_err(|e| {
        AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), rows = entry.row_count, "CSV artifact written");
    Ok(path)
}

pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content)
        .map_err(|e| AppError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read a text file whatever its encoding: BOM-marked UTF-8/UTF-16 first,
/// then strict UTF-8, falling back to Windows-1252.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(decode_text(&bytes))
}

pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        debug!(encoding = encoding.name(), "Decoding input using BOM");
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return text.into_owned();
    }

    debug!("Input is not UTF-8, decoding as windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_and_without_bom() {
        assert_eq!(decode_text("contraseña".as_bytes()), "contraseña");
        assert_eq!(decode_text("\u{feff}contraseña".as_bytes()), "contraseña");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "contraseña" encoded as Latin-1
        let bytes = b"contrase\xf1a";
        assert_eq!(decode_text(bytes), "contraseña");
    }

    #[test]
    fn test_decode_utf16_bom() {
        let bytes = [0xFF, 0xFE, b'o', 0x00, b'k', 0x00];
        assert_eq!(decode_text(&bytes), "ok");
    }

    #[test]
    fn test_artifact_bytes_bom() {
        assert_eq!(artifact_bytes("x", true), "\u{feff}x".as_bytes());
        assert_eq!(artifact_bytes("x", false), b"x");
    }

    #[test]
    fn test_write_artifact_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let entry = HistoryEntry::new("\"Title\"\r\n".to_string(), 0, 0);

        let path = write_csv_artifact(&out, &entry, true).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("casos_qa_") && name.ends_with(".csv"));
        assert_eq!(fs::read(&path).unwrap(), "\u{feff}\"Title\"\r\n".as_bytes());
    }
}
