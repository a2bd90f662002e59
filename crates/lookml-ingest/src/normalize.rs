//! Sheet normalization for the two-row header convention.
//!
//! Metadata sheets open with a descriptive label row, followed by the row
//! holding the real column headers. Normalization:
//!
//! 1. drops rows whose cells are all blank,
//! 2. discards the first remaining row (the label row),
//! 3. promotes the next row to headers,
//! 4. drops columns whose header is blank.

use lookml_model::{Sheet, SheetRow};

/// Collapses internal whitespace and strips a BOM from a header cell.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Builds a [`Sheet`] from raw rows following the two-row header convention.
pub fn normalize_sheet(raw_rows: Vec<Vec<String>>) -> Sheet {
    let mut content = raw_rows
        .into_iter()
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()));

    // Label row.
    if content.next().is_none() {
        return Sheet::default();
    }
    let Some(header_row) = content.next() else {
        return Sheet::default();
    };

    let mut keep = Vec::new();
    let mut headers = Vec::new();
    for (idx, raw) in header_row.iter().enumerate() {
        let header = normalize_header(raw);
        if header.is_empty() {
            continue;
        }
        keep.push(idx);
        headers.push(header);
    }

    let rows = content
        .map(|row| {
            SheetRow::new(
                keep.iter()
                    .map(|&idx| row.get(idx).map(String::as_str).unwrap_or("").to_string()),
            )
        })
        .collect();

    Sheet::new(headers, rows)
}
