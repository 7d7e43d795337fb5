//! Excel read/write.

use crate::error::{MatchError, Result};
use crate::table::RecordSet;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::Path;

/// Read one worksheet into a `RecordSet`. The first sheet is used unless a
/// name is given. The first row is the header.
pub fn read(path: &Path, sheet: Option<&str>) -> Result<RecordSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(MatchError::SheetNotFound {
                    file: path.display().to_string(),
                    sheet: name.to_string(),
                });
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| MatchError::EmptyTable(path.display().to_string()))?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| MatchError::EmptyTable(path.display().to_string()))?
        .iter()
        .map(cell_to_string)
        .collect();

    let mut set = RecordSet::new(headers);
    for row in rows {
        set.push_row(row.iter().map(cell_to_string).collect());
    }
    Ok(set)
}

/// Lossless, locale-independent cell text.
///
/// Whole floats render without the trailing `.0` so part numbers read from
/// differently-typed sheets still compare equal.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Write the table to a new workbook with a bold header row.
pub fn write(path: &Path, set: &RecordSet) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    for (col, header) in set.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }
    for (row_idx, row) in set.rows().iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet.write_string(row_idx as u32 + 1, col as u16, cell)?;
            }
        }
    }
    worksheet.autofit();

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_lose_the_decimal_point() {
        assert_eq!(cell_to_string(&Data::Float(123.0)), "123");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(-4)), "-4");
    }

    #[test]
    fn empty_and_error_cells_become_empty_strings() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let mut set = RecordSet::new(vec!["Unique ID".into(), "Brand".into()]);
        set.push_row(vec!["1".into(), "Acme".into()]);
        set.push_row(vec!["2".into(), String::new()]);

        write(&path, &set).unwrap();
        let back = read(&path, None).unwrap();
        assert_eq!(back.headers(), set.headers());
        assert_eq!(back.rows()[0], vec!["1", "Acme"]);
    }

    #[test]
    fn missing_sheet_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let set = RecordSet::new(vec!["A".into()]);
        write(&path, &set).unwrap();

        let err = read(&path, Some("NoSuchSheet")).unwrap_err();
        assert!(matches!(err, MatchError::SheetNotFound { .. }));
    }
}
