use clap::Parser;
use pim_match::{cli, config, diff, error, inherit, io, matcher, normalize};

use chrono::Local;
use cli::{Cli, Commands};
use config::Settings;
use error::Result;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            import,
            reference,
            output,
            settings,
            import_sheet,
            reference_sheet,
            id_column,
            priority_columns,
            weight,
            match_column,
            no_inherit,
        } => {
            println!("🔗 pim-match - identifier matching\n");

            let mut settings = Settings::load(settings.as_deref())?;
            if let Some(id) = id_column {
                settings.id_column = id;
            }
            if !priority_columns.is_empty() {
                settings.priority_columns = priority_columns;
            }
            if let Some(w) = weight {
                settings.priority_weight = w;
            }
            if let Some(name) = match_column {
                settings.match_column = name;
            }
            if let Some(sheet) = import_sheet {
                settings.import_sheet = Some(sheet);
            }
            if let Some(sheet) = reference_sheet {
                settings.reference_sheet = Some(sheet);
            }
            if no_inherit {
                settings.hierarchy = None;
            }
            settings.validate()?;

            println!("[1/4] Reading sheets...");
            let import_set = io::read_table(&import, settings.import_sheet.as_deref())?;
            let reference_set = io::read_table(&reference, settings.reference_sheet.as_deref())?;
            println!(
                "✔ {} import rows, {} reference rows\n",
                import_set.row_count(),
                reference_set.row_count()
            );

            println!("[2/4] Normalizing...");
            let mut import_set = normalize::normalize(&import_set);
            let mut reference_set = normalize::normalize(&reference_set);
            if let Some(hierarchy) = &settings.hierarchy {
                import_set =
                    inherit::inherit_fill(&import_set, hierarchy, &import.display().to_string())?;
                reference_set = inherit::inherit_fill(
                    &reference_set,
                    hierarchy,
                    &reference.display().to_string(),
                )?;
                println!("✔ Normalized, hierarchy fill applied\n");
            } else {
                println!("✔ Normalized\n");
            }

            println!("[3/4] Matching...");
            let outcome = matcher::run_match(
                &import_set,
                &reference_set,
                &settings,
                &reference.display().to_string(),
            )?;
            for warning in &outcome.stats.warnings {
                eprintln!("⚠ {warning}");
            }
            println!(
                "✔ {} columns compared ({} priority), {} rows with no agreement\n",
                outcome.stats.compared_columns,
                outcome.stats.priority_columns,
                outcome.stats.zero_score_rows
            );
            if cli.verbose {
                println!(
                    "  import rows: {}, reference rows: {}",
                    outcome.stats.import_rows, outcome.stats.reference_rows
                );
            }

            println!("[4/4] Writing output...");
            let output = output.unwrap_or_else(|| suffixed_path(&import, "-matched"));
            io::write_table(&output, &outcome.table)?;
            println!("✔ Saved to: {}", output.display());

            println!(
                "\n✅ Done ({})",
                Local::now().format("%Y-%m-%d %H:%M")
            );
        }

        Commands::Inherit {
            input,
            output,
            settings,
            sheet,
        } => {
            println!("🧬 pim-match - hierarchy fill\n");

            let settings = Settings::load(settings.as_deref())?;
            let hierarchy = settings.hierarchy.as_ref().ok_or_else(|| {
                error::MatchError::Settings("no hierarchy block in the settings file".into())
            })?;

            let set = io::read_table(&input, sheet.as_deref())?;
            println!("✔ {} rows read", set.row_count());

            let normalized = normalize::normalize(&set);
            let filled = inherit::inherit_fill(&normalized, hierarchy, &input.display().to_string())?;

            let output = output.unwrap_or_else(|| suffixed_path(&input, "-hierarchy-filled"));
            io::write_table(&output, &filled)?;
            println!("✅ Filled sheet saved to: {}", output.display());
        }

        Commands::Headers {
            input,
            sheet,
            output,
        } => {
            let set = io::read_table(&input, sheet.as_deref())?;

            match output {
                Some(path) => {
                    let headers_only = pim_match::table::RecordSet::new(set.headers().to_vec());
                    io::write_table(&path, &headers_only)?;
                    println!("✅ Column headers exported to: {}", path.display());
                }
                None => {
                    for header in set.headers() {
                        println!("{header}");
                    }
                }
            }
        }

        Commands::Diff {
            left,
            right,
            output,
        } => {
            println!("🔍 pim-match - export comparison\n");

            let left_set = io::read_table(&left, None)?;
            let right_set = io::read_table(&right, None)?;

            let report = diff::compare(&left_set, &right_set);
            if report.is_clean() {
                println!("✅ No differences in {} rows", report.rows_compared);
            } else {
                let output = output.unwrap_or_else(|| comparison_path(&left, &right));
                diff::write_report(&report, &output)?;
                println!(
                    "⚠ {} of {} rows differ\n✅ Report saved to: {}",
                    report.left_rows.len(),
                    report.rows_compared,
                    output.display()
                );
            }
        }

        Commands::Config {
            init,
            show,
            settings,
        } => {
            let path = match &settings {
                Some(p) => p.clone(),
                None => Settings::config_path()?,
            };

            if init {
                let defaults = Settings::default();
                defaults.save(&path)?;
                println!("✔ Settings written to: {}", path.display());
            }

            if show || !init {
                let effective = Settings::load(settings.as_deref())?;
                println!("Settings ({}):", path.display());
                println!("  id column:       {}", effective.id_column);
                println!("  match column:    {}", effective.match_column);
                println!(
                    "  priority:        {} (weight {})",
                    effective.priority_columns.join(", "),
                    effective.priority_weight
                );
                match &effective.hierarchy {
                    Some(h) => println!(
                        "  hierarchy:       {} ({} / {}), inherits {}",
                        h.level_column,
                        h.base_tag,
                        h.derived_tag,
                        h.inherit_columns.join(", ")
                    ),
                    None => println!("  hierarchy:       disabled"),
                }
            }
        }
    }

    Ok(())
}

/// `reports/import.xlsx` -> `reports/import-matched.xlsx`
fn suffixed_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".into());
    input.with_file_name(format!("{stem}{suffix}.xlsx"))
}

/// `a.xlsx` + `b.xlsx` -> `a-b-comparison.xlsx` next to the first file.
fn comparison_path(left: &Path, right: &Path) -> PathBuf {
    let name = |p: &Path| {
        p.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".into())
    };
    left.with_file_name(format!("{}-{}-comparison.xlsx", name(left), name(right)))
}
