//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and splitting a sheet.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not a supported spreadsheet or CSV container.
    #[error("unsupported input format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// Failed to open or parse a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook has no worksheet.
    #[error("workbook has no worksheet: {path}")]
    NoWorksheet { path: PathBuf },

    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    // === Sheet Structure Errors ===
    /// A required header is absent from the sheet.
    #[error("required column '{column}' not found in sheet")]
    MissingColumn { column: String },

    /// A row group has a blank or inconsistent `TABLE NAME`.
    #[error("malformed table group #{group}: {reason}")]
    MalformedGroup { group: usize, reason: String },

    /// A row group holds no rows.
    #[error("table group #{group} has no rows")]
    EmptyGroup { group: usize },

    /// A column row has a blank `COLUMN NAME`.
    #[error("table {table}: blank column name in group row {row}")]
    BlankColumnName { table: String, row: usize },
}

impl IngestError {
    pub(crate) fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
