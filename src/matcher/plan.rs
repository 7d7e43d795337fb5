//! Schema resolution for the matching scan.
//!
//! All column names are resolved to indices once, before the O(n·m) loop,
//! so the scan itself never touches header strings.

use crate::config::Settings;
use crate::error::{MatchError, Result};
use crate::table::RecordSet;

/// One scored column: cell positions on each side plus its weight.
#[derive(Debug, Clone, Copy)]
struct ColumnPair {
    import_col: usize,
    reference_col: usize,
    weight: u64,
}

/// Resolved scoring plan for one import/reference pair.
#[derive(Debug)]
pub struct MatchPlan {
    pub id_col: usize,
    pairs: Vec<ColumnPair>,
    priority_count: usize,
    pub warnings: Vec<String>,
}

impl MatchPlan {
    /// Resolve the shared column set and partition it into priority and
    /// ordinary pairs.
    ///
    /// The identifier column must exist on the reference side. A priority
    /// column present on neither side is a settings error (most likely a
    /// typo); present on exactly one side it is dropped from scoring with a
    /// warning, since import exports routinely lack reference-only columns.
    pub fn resolve(
        import: &RecordSet,
        reference: &RecordSet,
        settings: &Settings,
        reference_file: &str,
    ) -> Result<Self> {
        let id_col =
            reference
                .column_index(&settings.id_column)
                .ok_or_else(|| MatchError::MissingColumn {
                    column: settings.id_column.clone(),
                    file: reference_file.to_string(),
                })?;

        let mut warnings = Vec::new();
        let mut pairs = Vec::new();

        let is_priority = |name: &str| {
            settings
                .priority_columns
                .iter()
                .any(|p| p.trim().to_lowercase() == name.trim().to_lowercase())
        };

        for name in &settings.priority_columns {
            let import_col = import.column_index(name);
            let reference_col = reference.column_index(name);
            match (import_col, reference_col) {
                (Some(i), Some(r)) if r != id_col => pairs.push(ColumnPair {
                    import_col: i,
                    reference_col: r,
                    weight: settings.priority_weight as u64,
                }),
                (Some(_), Some(_)) => {
                    return Err(MatchError::Settings(format!(
                        "priority column \"{name}\" is the identifier column"
                    )))
                }
                (None, None) => {
                    return Err(MatchError::Settings(format!(
                        "priority column \"{name}\" not found in either sheet"
                    )))
                }
                _ => warnings.push(format!(
                    "priority column \"{name}\" only exists on one sheet; excluded from scoring"
                )),
            }
        }
        let priority_count = pairs.len();

        for name in import.shared_columns(reference) {
            if is_priority(&name) {
                continue;
            }
            let import_col = import.column_index(&name);
            let reference_col = reference.column_index(&name);
            if let (Some(i), Some(r)) = (import_col, reference_col) {
                if r == id_col {
                    continue;
                }
                pairs.push(ColumnPair {
                    import_col: i,
                    reference_col: r,
                    weight: 1,
                });
            }
        }

        if pairs.is_empty() {
            return Err(MatchError::Settings(
                "the two sheets share no columns to compare".into(),
            ));
        }

        Ok(Self {
            id_col,
            pairs,
            priority_count,
            warnings,
        })
    }

    pub fn score(&self, import_row: &[String], reference_row: &[String]) -> u64 {
        self.pairs
            .iter()
            .filter(|p| import_row[p.import_col] == reference_row[p.reference_col])
            .map(|p| p.weight)
            .sum()
    }

    pub fn compared_columns(&self) -> usize {
        self.pairs.len()
    }

    pub fn priority_columns(&self) -> usize {
        self.priority_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(priority: &[&str]) -> Settings {
        Settings {
            priority_columns: priority.iter().map(|s| s.to_string()).collect(),
            hierarchy: None,
            ..Settings::default()
        }
    }

    fn table(headers: &[&str]) -> RecordSet {
        RecordSet::new(headers.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let import = table(&["Brand"]);
        let reference = table(&["Brand"]);
        let err = MatchPlan::resolve(&import, &reference, &settings(&[]), "ref.xlsx").unwrap_err();
        assert!(matches!(err, MatchError::MissingColumn { .. }));
    }

    #[test]
    fn priority_column_missing_everywhere_is_an_error() {
        let import = table(&["Brand"]);
        let reference = table(&["Unique ID", "Brand"]);
        let err =
            MatchPlan::resolve(&import, &reference, &settings(&["Colour"]), "ref").unwrap_err();
        assert!(matches!(err, MatchError::Settings(_)));
    }

    #[test]
    fn one_sided_priority_column_warns_and_is_dropped() {
        let import = table(&["Brand", "Color"]);
        let reference = table(&["Unique ID", "Brand"]);
        let plan =
            MatchPlan::resolve(&import, &reference, &settings(&["Color"]), "ref").unwrap();
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.priority_columns(), 0);
        assert_eq!(plan.compared_columns(), 1); // Brand, ordinary
    }

    #[test]
    fn identifier_is_excluded_from_ordinary_columns() {
        let import = table(&["Unique ID", "Brand"]);
        let reference = table(&["Unique ID", "Brand"]);
        let plan = MatchPlan::resolve(&import, &reference, &settings(&[]), "ref").unwrap();
        assert_eq!(plan.compared_columns(), 1);
    }

    #[test]
    fn no_shared_columns_is_an_error() {
        let import = table(&["Size"]);
        let reference = table(&["Unique ID", "Brand"]);
        let err = MatchPlan::resolve(&import, &reference, &settings(&[]), "ref").unwrap_err();
        assert!(matches!(err, MatchError::Settings(_)));
    }

    #[test]
    fn priority_weight_applies_to_priority_pairs() {
        let import = table(&["Brand", "Size"]);
        let reference = table(&["Unique ID", "Brand", "Size"]);
        let plan =
            MatchPlan::resolve(&import, &reference, &settings(&["Brand"]), "ref").unwrap();
        let import_row: Vec<String> = vec!["acme".into(), "m".into()];
        let ref_row: Vec<String> = vec!["1".into(), "acme".into(), "l".into()];
        assert_eq!(plan.score(&import_row, &ref_row), 10);
    }
}
