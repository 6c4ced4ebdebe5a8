use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayslipError {
    #[error("Config directory not found at {0}. Run 'payslip init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Spreadsheet is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unsupported spreadsheet format: {0}. Use .xlsx, .xls, .ods or .csv")]
    UnsupportedFormat(PathBuf),

    #[error("Spreadsheet {0} has no worksheet or header row")]
    EmptySheet(PathBuf),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Logo '{reference}' could not be loaded: {reason}")]
    Logo { reference: String, reason: String },

    #[error("Rows {first_row} and {second_row} would both be written to {path}")]
    DuplicateSlip {
        path: PathBuf,
        first_row: usize,
        second_row: usize,
    },

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Slip worker panicked while rendering row {0}")]
    WorkerPanicked(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PayslipError>;
