//! File-level error types

use thiserror::Error;

/// Result type for opening and saving files
pub type FileResult<T> = std::result::Result<T, FileError>;

/// Errors from [`SelectableExt::open`](crate::SelectableExt::open) and
/// [`TidyDataExt::save`](crate::TidyDataExt::save)
#[derive(Debug, Error)]
pub enum FileError {
    /// The file extension is not one we can read or write
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Reading or writing failed
    #[error(transparent)]
    Csv(#[from] tidy_sheets_csv::CsvError),
}
