use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (use .xlsx, .xlsm, .xls or .csv)")]
    UnsupportedFormat(String),

    #[error("Sheet not found in {file}: {sheet}")]
    SheetNotFound { file: String, sheet: String },

    #[error("No header row in {0}")]
    EmptyTable(String),

    #[error("Column \"{column}\" not found in {file}")]
    MissingColumn { column: String, file: String },

    #[error("Row {row} in {file} has more cells than the header")]
    RowTooWide { row: usize, file: String },

    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
