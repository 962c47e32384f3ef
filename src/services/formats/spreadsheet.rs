//! Spreadsheet text extraction (xlsx, xls, csv)
//!
//! Excel workbooks go through calamine; every sheet is rendered as
//! tab-separated rows under its sheet name. CSV files are rendered as
//! comma-joined records.

use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto_from_rs, Reader};

/// Extract text from an Excel workbook (xlsx or legacy xls)
pub fn extract_workbook(data: &[u8]) -> Result<String> {
    let cursor = Cursor::new(data);
    let mut workbook =
        open_workbook_auto_from_rs(cursor).context("failed to open spreadsheet workbook")?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut out = String::new();

    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("failed to read worksheet {}", name))?;
        if range.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&name);
        out.push('\n');

        for row in range.rows() {
            let line = row
                .iter()
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            out.push_str(&line);
            out.push('\n');
        }
    }

    Ok(out)
}

/// Extract text from a CSV file
///
/// Records become lines with fields joined by `, `. Ragged rows are
/// accepted; headers are not treated specially.
pub fn extract_csv(data: &[u8]) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse CSV record")?;
        lines.push(record.iter().collect::<Vec<_>>().join(", "));
    }

    Ok(lines.join("\n"))
}
