//! Minimal quoted-CSV codec.
//!
//! Quoted fields may contain commas, doubled quotes, and line breaks
//! (Excel description cells routinely carry embedded newlines), so parsing
//! streams over the whole file rather than splitting on lines. That covers
//! every export this tool deals with.

use crate::error::{MatchError, Result};
use crate::table::RecordSet;
use std::path::Path;

pub fn read(path: &Path) -> Result<RecordSet> {
    let content = std::fs::read_to_string(path)?;
    let mut records = parse(&content);

    if records.is_empty() {
        return Err(MatchError::EmptyTable(path.display().to_string()));
    }
    let headers = records.remove(0);
    let width = headers.len();

    let mut set = RecordSet::new(headers);
    for (idx, mut row) in records.into_iter().enumerate() {
        // Trailing commas produce empty overflow cells; those are harmless.
        while row.len() > width && row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
        if row.len() > width {
            return Err(MatchError::RowTooWide {
                // 1-based file row, counting the header.
                row: idx + 2,
                file: path.display().to_string(),
            });
        }
        set.push_row(row);
    }
    Ok(set)
}

pub fn write(path: &Path, set: &RecordSet) -> Result<()> {
    let mut out = String::new();
    write_record(&mut out, set.headers());
    for row in set.rows() {
        write_record(&mut out, row);
    }
    std::fs::write(path, out)?;
    Ok(())
}

/// Parse the whole file into records. A newline inside quotes is field
/// content, not a record boundary. Blank lines are skipped.
fn parse(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // Doubled quote inside a quoted field is a literal quote.
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes => {
                // Swallowed; the record ends at the following '\n'.
            }
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }
    // Final record when the file has no trailing newline.
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    records
}

fn write_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_fields() {
        assert_eq!(parse("a,b,c\n"), vec![vec!["a", "b", "c"]]);
        assert_eq!(parse("\"a,b\",c\n"), vec![vec!["a,b", "c"]]);
        assert_eq!(parse("\"say \"\"hi\"\"\",x\n"), vec![vec!["say \"hi\"", "x"]]);
        assert_eq!(parse("a,,c\n"), vec![vec!["a", "", "c"]]);
    }

    #[test]
    fn newline_inside_quotes_stays_in_the_field() {
        assert_eq!(
            parse("\"line one\nline two\",x\ny,z\n"),
            vec![vec!["line one\nline two", "x"], vec!["y", "z"]]
        );
    }

    #[test]
    fn crlf_and_missing_trailing_newline() {
        assert_eq!(
            parse("a,b\r\nc,d"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("a\n\nb\n"), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn writes_quotes_only_when_needed() {
        let mut out = String::new();
        write_record(
            &mut out,
            &["plain".into(), "with,comma".into(), "with \"q\"".into()],
        );
        assert_eq!(out, "plain,\"with,comma\",\"with \"\"q\"\"\"\n");
    }

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");

        let mut set = RecordSet::new(vec!["Unique ID".into(), "Name".into()]);
        set.push_row(vec!["1".into(), "Tub, freestanding".into()]);
        set.push_row(vec!["2".into(), String::new()]);

        write(&path, &set).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn roundtrip_preserves_embedded_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");

        let mut set = RecordSet::new(vec!["Unique ID".into(), "Description".into()]);
        set.push_row(vec!["1".into(), "line one\nline two".into()]);
        set.push_row(vec!["2".into(), "plain".into()]);

        write(&path, &set).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn over_wide_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "A,B\n1,2,3\n").unwrap();

        let err = read(&path).unwrap_err();
        assert!(matches!(err, MatchError::RowTooWide { row: 2, .. }));
    }

    #[test]
    fn trailing_empty_overflow_cells_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "A,B\n1,2,,\n").unwrap();

        let set = read(&path).unwrap();
        assert_eq!(set.rows()[0], vec!["1", "2"]);
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(read(&path), Err(MatchError::EmptyTable(_))));
    }
}
