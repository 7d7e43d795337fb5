//! Tabular file I/O.
//!
//! Readers and writers dispatch on the file extension: Excel workbooks go
//! through `calamine`/`rust_xlsxwriter`, `.csv` through the small codec in
//! `csv.rs`. The first row of every table is the header; data rows are padded
//! to header width on ingest. Output always goes to a new file.

pub mod csv;
pub mod excel;

use crate::error::{MatchError, Result};
use crate::table::RecordSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Excel,
    Csv,
}

fn detect_format(path: &Path) -> Result<Format> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" => Ok(Format::Excel),
        "csv" => Ok(Format::Csv),
        _ => Err(MatchError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read a table from an Excel workbook or CSV file.
///
/// `sheet` selects a worksheet by name; the first sheet is used when `None`.
/// CSV files ignore `sheet`.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<RecordSet> {
    if !path.exists() {
        return Err(MatchError::FileNotFound(path.display().to_string()));
    }
    match detect_format(path)? {
        Format::Excel => excel::read(path, sheet),
        Format::Csv => csv::read(path),
    }
}

/// Write a table to a new Excel workbook or CSV file.
pub fn write_table(path: &Path, set: &RecordSet) -> Result<()> {
    match detect_format(path)? {
        Format::Excel => excel::write(path, set),
        Format::Csv => csv::write(path, set),
    }
}
