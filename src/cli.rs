use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pim-match")]
#[command(about = "Weighted record matcher for PIM exports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match import rows against a reference export and append their Unique IDs
    Match {
        /// Import sheet (rows that need identifiers)
        #[arg(required = true)]
        import: PathBuf,

        /// Reference/backup sheet (rows that already carry identifiers)
        #[arg(required = true)]
        reference: PathBuf,

        /// Output file (default: <import>-matched.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings JSON file (default: ~/.config/pim-match/config.json)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Worksheet name on the import file (default: first sheet)
        #[arg(long)]
        import_sheet: Option<String>,

        /// Worksheet name on the reference file (default: first sheet)
        #[arg(long)]
        reference_sheet: Option<String>,

        /// Identifier column on the reference sheet
        #[arg(long)]
        id_column: Option<String>,

        /// Priority column (repeatable; overrides the settings file)
        #[arg(short = 'p', long = "priority")]
        priority_columns: Vec<String>,

        /// Score weight for priority columns
        #[arg(short = 'w', long)]
        weight: Option<u32>,

        /// Name of the appended match column
        #[arg(long)]
        match_column: Option<String>,

        /// Skip the hierarchy inheritance fill
        #[arg(long)]
        no_inherit: bool,
    },

    /// Backfill blank inherited columns from base rows, without matching
    Inherit {
        /// Input sheet
        #[arg(required = true)]
        input: PathBuf,

        /// Output file (default: <input>-hierarchy-filled.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings JSON file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Print the column headers of a sheet, or export them to CSV
    Headers {
        /// Input sheet
        #[arg(required = true)]
        input: PathBuf,

        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Write the headers as a one-row CSV instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two exports cell by cell and write a highlighted report
    Diff {
        /// First file
        #[arg(required = true)]
        left: PathBuf,

        /// Second file
        #[arg(required = true)]
        right: PathBuf,

        /// Report file (default: <left>-<right>-comparison.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show effective settings or write a starter settings file
    Config {
        /// Write a settings file with the defaults
        #[arg(long)]
        init: bool,

        /// Show the effective settings
        #[arg(long)]
        show: bool,

        /// Settings file to read or write (default: ~/.config/pim-match/config.json)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}
