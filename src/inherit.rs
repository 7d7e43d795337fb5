//! Hierarchy inheritance fill.
//!
//! PIM exports interleave base products and their sellable variants in one
//! sheet, with a level column tagging each row. Variants leave inherited
//! fields (Brand, typically) blank; this pass backfills them from the most
//! recent base row so the matcher can compare those fields directly.

use crate::config::HierarchySettings;
use crate::error::{MatchError, Result};
use crate::table::RecordSet;

/// Backfill blank inherited columns from the last seen BASE row.
///
/// Rows are walked in order. A row whose level cell equals the base tag
/// replaces the running base values with its own, blanks included, so a blank
/// on a base row stops propagation from an earlier base. Every row, base rows
/// included, then has blank inherited cells filled from the running values.
/// A derived row before any base row keeps its blanks.
///
/// Fails fast if the level column or any inherited column is missing.
pub fn inherit_fill(set: &RecordSet, settings: &HierarchySettings, file: &str) -> Result<RecordSet> {
    let level_col = set
        .column_index(&settings.level_column)
        .ok_or_else(|| MatchError::MissingColumn {
            column: settings.level_column.clone(),
            file: file.to_string(),
        })?;

    let mut inherit_cols = Vec::with_capacity(settings.inherit_columns.len());
    for name in &settings.inherit_columns {
        let idx = set
            .column_index(name)
            .ok_or_else(|| MatchError::MissingColumn {
                column: name.clone(),
                file: file.to_string(),
            })?;
        inherit_cols.push(idx);
    }

    let base_tag = settings.base_tag.trim().to_lowercase();
    // One slot per inherited column; None until the first base row.
    let mut last_base: Vec<Option<String>> = vec![None; inherit_cols.len()];

    let mut out = RecordSet::new(set.headers().to_vec());
    for row in set.rows() {
        let mut new_row = row.clone();

        if row[level_col].trim().to_lowercase() == base_tag {
            for (slot, &col) in last_base.iter_mut().zip(&inherit_cols) {
                *slot = Some(row[col].clone());
            }
        }

        for (slot, &col) in last_base.iter().zip(&inherit_cols) {
            if new_row[col].is_empty() {
                if let Some(value) = slot {
                    new_row[col] = value.clone();
                }
            }
        }

        out.push_row(new_row);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> HierarchySettings {
        HierarchySettings {
            level_column: "Level".into(),
            base_tag: "base".into(),
            derived_tag: "variant".into(),
            inherit_columns: vec!["Brand".into()],
        }
    }

    fn table(rows: &[(&str, &str)]) -> RecordSet {
        let mut set = RecordSet::new(vec!["Level".into(), "Brand".into()]);
        for (level, brand) in rows {
            set.push_row(vec![level.to_string(), brand.to_string()]);
        }
        set
    }

    fn brands(set: &RecordSet) -> Vec<&str> {
        set.rows().iter().map(|r| r[1].as_str()).collect()
    }

    #[test]
    fn variants_take_brand_from_last_base() {
        let set = table(&[
            ("base", "acme"),
            ("variant", ""),
            ("variant", ""),
            ("base", "zenith"),
            ("variant", ""),
        ]);
        let filled = inherit_fill(&set, &settings(), "test").unwrap();
        assert_eq!(brands(&filled), vec!["acme", "acme", "acme", "zenith", "zenith"]);
    }

    #[test]
    fn variant_before_any_base_keeps_blank() {
        let set = table(&[("variant", ""), ("base", "acme"), ("variant", "")]);
        let filled = inherit_fill(&set, &settings(), "test").unwrap();
        assert_eq!(brands(&filled), vec!["", "acme", "acme"]);
    }

    #[test]
    fn explicit_variant_value_is_kept() {
        let set = table(&[("base", "acme"), ("variant", "zenith")]);
        let filled = inherit_fill(&set, &settings(), "test").unwrap();
        assert_eq!(brands(&filled), vec!["acme", "zenith"]);
    }

    #[test]
    fn blank_base_stops_propagation() {
        let set = table(&[("base", "acme"), ("base", ""), ("variant", "")]);
        let filled = inherit_fill(&set, &settings(), "test").unwrap();
        // The second base row overwrites the running value with a blank.
        assert_eq!(brands(&filled), vec!["acme", "", ""]);
    }

    #[test]
    fn idempotent() {
        let set = table(&[("base", "acme"), ("variant", ""), ("variant", "zenith")]);
        let once = inherit_fill(&set, &settings(), "test").unwrap();
        let twice = inherit_fill(&once, &settings(), "test").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_level_column_fails() {
        let set = RecordSet::new(vec!["Brand".into()]);
        let err = inherit_fill(&set, &settings(), "test").unwrap_err();
        assert!(matches!(err, MatchError::MissingColumn { .. }));
    }
}
