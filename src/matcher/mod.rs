//! Weighted record matching.
//!
//! For every import row, scans every reference row and counts agreeing cells
//! over the columns the two sheets share: priority columns score
//! `priority_weight`, everything else scores 1. The reference row with the
//! highest total wins; on ties the earliest reference row wins (strict `>`
//! during the scan). Comparison is exact string equality, so both sheets must
//! be normalized (and inheritance-filled, if configured) first.

mod plan;

pub use plan::MatchPlan;

use crate::config::Settings;
use crate::error::Result;
use crate::table::RecordSet;
use indicatif::{ProgressBar, ProgressStyle};

/// Only draw a progress bar for scans long enough to care about.
const PROGRESS_THRESHOLD: usize = 200;

#[derive(Debug, Clone)]
pub struct MatchStats {
    pub import_rows: usize,
    pub reference_rows: usize,
    /// Shared non-identifier columns that took part in scoring.
    pub compared_columns: usize,
    /// Priority columns that survived schema resolution.
    pub priority_columns: usize,
    /// Import rows whose best score was zero (nothing agreed).
    pub zero_score_rows: usize,
    /// Non-fatal schema notes, e.g. a priority column missing on one side.
    pub warnings: Vec<String>,
}

pub struct MatchOutcome {
    /// The import table with the match column appended.
    pub table: RecordSet,
    pub stats: MatchStats,
}

/// Match every import row against the reference table and append the
/// identifier column. Both tables must already be normalized.
pub fn run_match(
    import: &RecordSet,
    reference: &RecordSet,
    settings: &Settings,
    reference_file: &str,
) -> Result<MatchOutcome> {
    let plan = MatchPlan::resolve(import, reference, settings, reference_file)?;

    let bar = if import.row_count() >= PROGRESS_THRESHOLD {
        let bar = ProgressBar::new(import.row_count() as u64);
        bar.set_style(
            ProgressStyle::with_template("  matching [{bar:30}] {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut matched_ids = Vec::with_capacity(import.row_count());
    let mut zero_score_rows = 0usize;

    for import_row in import.rows() {
        let mut best: Option<(u64, &str)> = None;

        for reference_row in reference.rows() {
            let score = plan.score(import_row, reference_row);
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, reference_row[plan.id_col].as_str()));
            }
        }

        let id = match best {
            Some((score, id)) => {
                if score == 0 {
                    zero_score_rows += 1;
                }
                id.to_string()
            }
            // No reference rows at all.
            None => String::new(),
        };
        matched_ids.push(id);
        bar.inc(1);
    }
    bar.finish_and_clear();

    let stats = MatchStats {
        import_rows: import.row_count(),
        reference_rows: reference.row_count(),
        compared_columns: plan.compared_columns(),
        priority_columns: plan.priority_columns(),
        zero_score_rows,
        warnings: plan.warnings.clone(),
    };

    let mut table = import.clone();
    table.push_column(&settings.match_column, matched_ids);

    Ok(MatchOutcome { table, stats })
}
