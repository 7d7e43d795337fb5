//! Cell normalization.
//!
//! Both tables pass through here before inheritance fill and matching so that
//! scoring can use plain string equality: every cell is trimmed and lowercased.
//! Blank and missing cells are already empty strings by the time a `RecordSet`
//! exists (the readers guarantee that), so this stage is trim + case-fold only.

use crate::table::RecordSet;

/// Produce a normalized copy of the table. The input is left untouched.
pub fn normalize(set: &RecordSet) -> RecordSet {
    let mut out = RecordSet::new(set.headers().to_vec());
    for row in set.rows() {
        out.push_row(row.iter().map(|cell| normalize_cell(cell)).collect());
    }
    out
}

fn normalize_cell(cell: &str) -> String {
    cell.trim().to_lowercase()
}
