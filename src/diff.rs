//! Cell-level comparison of two exports.
//!
//! Used to sanity-check a re-pulled export against the previous one before
//! matching: rows are compared positionally, the shorter table is padded with
//! blank rows, and only rows with at least one differing cell make it into
//! the report. The report workbook has one sheet per side with differing
//! cells filled red.

use crate::error::Result;
use crate::table::RecordSet;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::Path;

pub struct DiffReport {
    pub left_headers: Vec<String>,
    pub right_headers: Vec<String>,
    /// Differing rows from each side, positionally aligned.
    pub left_rows: Vec<Vec<String>>,
    pub right_rows: Vec<Vec<String>>,
    /// Per kept row: the column indices that differ.
    pub diff_columns: Vec<Vec<usize>>,
    /// Total rows compared (after padding).
    pub rows_compared: usize,
}

impl DiffReport {
    pub fn is_clean(&self) -> bool {
        self.left_rows.is_empty()
    }
}

/// Compare two tables row by row.
pub fn compare(left: &RecordSet, right: &RecordSet) -> DiffReport {
    let rows_compared = left.row_count().max(right.row_count());
    let width = left.headers().len().max(right.headers().len());
    let blank: Vec<String> = vec![String::new(); width];

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    let mut diff_columns = Vec::new();

    for i in 0..rows_compared {
        let l = pad(left.rows().get(i).unwrap_or(&blank), width);
        let r = pad(right.rows().get(i).unwrap_or(&blank), width);

        let diffs: Vec<usize> = (0..width).filter(|&c| l[c] != r[c]).collect();
        if !diffs.is_empty() {
            left_rows.push(l);
            right_rows.push(r);
            diff_columns.push(diffs);
        }
    }

    DiffReport {
        left_headers: left.headers().to_vec(),
        right_headers: right.headers().to_vec(),
        left_rows,
        right_rows,
        diff_columns,
        rows_compared,
    }
}

fn pad(row: &[String], width: usize) -> Vec<String> {
    let mut row = row.to_vec();
    row.resize(width, String::new());
    row
}

/// Write the report workbook: one sheet per side, differing cells red.
pub fn write_report(report: &DiffReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin);
    let diff_format = Format::new().set_background_color(Color::Red);

    for (sheet_name, headers, rows) in [
        ("Left Differences", &report.left_headers, &report.left_rows),
        ("Right Differences", &report.right_headers, &report.right_rows),
    ] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let diffs = &report.diff_columns[row_idx];
            for (col, cell) in row.iter().enumerate() {
                if diffs.contains(&col) {
                    worksheet.write_string_with_format(
                        row_idx as u32 + 1,
                        col as u16,
                        cell,
                        &diff_format,
                    )?;
                } else if !cell.is_empty() {
                    worksheet.write_string(row_idx as u32 + 1, col as u16, cell)?;
                }
            }
        }
        worksheet.autofit();
    }

    workbook.save(path)?;
    Ok(())
}
