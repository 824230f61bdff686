use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Error type covering the different failure cases that can occur while the
/// dashboard loads its workbook, builds charts, or serves the page.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Wrapper for IO failures such as binding the listener or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the workbook path does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when one of the required sheets is absent from the workbook.
    #[error("missing sheet '{0}'")]
    MissingSheet(String),

    /// Raised when a chart references a column the sheet does not carry.
    #[error("missing column '{column}' in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    /// Raised when a histogram is requested with zero bins.
    #[error("histogram for column {column} needs at least one bin")]
    InvalidBinCount { column: String },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
