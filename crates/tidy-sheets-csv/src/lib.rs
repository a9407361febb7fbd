//! # tidy-sheets-csv
//!
//! CSV collaborators for tidy-sheets: read a CSV file into a grid
//! [`Table`](tidy_sheets_core::Table), write [`TidyData`](tidy_sheets_core::TidyData)
//! rows out as CSV.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
