use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VentilError {
    #[error("failed to read {path}: {reason}")]
    Ingest { path: PathBuf, reason: String },

    #[error("unsupported input format: {0}. Use .csv, .txt, .xlsx, .xlsm, .xls or .ods")]
    UnsupportedFormat(String),

    #[error("row {row} has {found} cells but the header list has {expected} columns")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no data: {0}")]
    EmptyInput(String),

    #[error("failed to load threshold profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid threshold profile: {0}")]
    ProfileInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
