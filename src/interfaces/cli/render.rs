use crate::domain::csv::{IncompleteReason, PreviewTable, SanitizedCsv};

const DEFAULT_COLUMN_WIDTH: usize = 28;

/// Plain-text grid of the preview, one line per test case
pub fn render_preview(table: &PreviewTable) -> String {
    render_preview_with_width(table, DEFAULT_COLUMN_WIDTH)
}

pub fn render_preview_with_width(table: &PreviewTable, max_width: usize) -> String {
    let flat_rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| fit(cell, max_width)).collect())
        .collect();

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            flat_rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .min(max_width)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&join_padded(&table.headers, &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in &flat_rows {
        out.push_str(&join_padded(row, &widths));
        out.push('\n');
    }
    out
}

/// One-paragraph report of what the sanitizer had to fix
pub fn render_summary(sanitized: &SanitizedCsv) -> String {
    let mut lines = vec![format!("{} test case(s) generated.", sanitized.table.len())];

    let missing = count_reason(sanitized, IncompleteReason::MissingColumns);
    let extra = count_reason(sanitized, IncompleteReason::ExtraColumns);
    if missing + extra > 0 {
        lines.push(format!(
            "{} incomplete row(s) repaired: {} padded, {} truncated. Review them before importing.",
            missing + extra,
            missing,
            extra
        ));
        for row in &sanitized.incomplete_rows {
            let title = row.cells.first().map(String::as_str).unwrap_or("");
            lines.push(format!(
                "  record {}: {} cell(s) \"{}\"",
                row.record_index + 1,
                row.cells.len(),
                fit(title, 40)
            ));
        }
    }
    for warning in &sanitized.preview_warnings {
        lines.push(format!("Preview warning: {}", warning));
    }

    lines.join("\n")
}

fn count_reason(sanitized: &SanitizedCsv, reason: IncompleteReason) -> usize {
    sanitized
        .incomplete_rows
        .iter()
        .filter(|row| row.reason == reason)
        .count()
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let len = cell.chars().count();
            format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Single-line, width-limited form of a cell
fn fit(cell: &str, max_width: usize) -> String {
    let flat = cell.split('\n').map(str::trim).collect::<Vec<_>>().join(" / ");
    if flat.chars().count() <= max_width {
        return flat;
    }
    let mut truncated: String = flat.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
