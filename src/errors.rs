use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting a bank export into YNAB CSV.
///
/// Only structural problems surface here. Per-row anomalies (an odd date, an
/// amount that is not a number) degrade into partial values instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input is not a readable spreadsheet, or its layout is too narrow
    #[error("Invalid input format: {0}")]
    InputFormat(String),

    /// Reading the input or writing a scratch file failed
    #[error("File I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The builder was called without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Writing the CSV output failed
    #[error("Failed to write CSV output: {0}")]
    WriteFailed(#[from] csv::Error),

    /// No `.xls`/`.xlsx` file was found where one was expected
    #[error("No Excel file found in {}", .0.display())]
    NoInputFound(PathBuf),
}

/// Convenience alias for results carrying a [`ConvertError`]
pub type ConvertResult<T> = Result<T, ConvertError>;
