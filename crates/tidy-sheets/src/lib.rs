//! # tidy-sheets
//!
//! Turn presentation-style spreadsheets into tidy data.
//!
//! Spreadsheets made for people put dimension labels wherever they read
//! best: column headers, row headers, section titles, merged cells.
//! tidy-sheets selects the observations and each dimension by position,
//! says where each dimension lies relative to the observations, and
//! produces one row per observation.
//!
//! ## Example
//!
//! ```rust
//! use tidy_sheets::prelude::*;
//!
//! let table = Table::from_rows(
//!     "births",
//!     vec![
//!         vec!["Births", "", ""],
//!         vec!["", "Boys", "Girls"],
//!         vec!["Wales", "", ""],
//!         vec!["Cardiff", "5", "6"],
//!         vec!["Swansea", "3", "4"],
//!     ],
//! )
//! .unwrap();
//! let sheet = Selectable::new(table);
//!
//! let country = sheet.excel_ref("A3").unwrap().label_as("Country");
//! let sex = sheet.row(2).unwrap().is_not_blank().label_as("Sex");
//! let city = sheet.excel_ref("A4:A5").unwrap().label_as("City");
//! let observations = sheet.excel_ref("B4:C5").unwrap();
//!
//! let mut tidy = TidyData::new(
//!     &observations,
//!     vec![
//!         Column::new(country.attach_closest(DOWN).unwrap()),
//!         Column::new(sex.attach_directly(DOWN).unwrap()),
//!         Column::new(city.attach_directly(RIGHT).unwrap()),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(tidy.rows().unwrap()[3], vec!["4", "Wales", "Girls", "Swansea"]);
//! // tidy.save("births.csv").unwrap();
//! ```

mod error;
pub mod prelude;

pub use error::{FileError, FileResult};

// Re-export core types
pub use tidy_sheets_core::{
    BaseCell,
    Bounds,
    Cell,
    CellFormat,
    CellId,
    Closest,
    Column,
    Constant,
    Direction,
    Directly,
    // Error types
    Error,
    ExcelRef,
    FnValidator,
    Heading,
    HorizontalAlignment,
    HorizontalCondition,
    ItemsValidator,
    LiveTable,
    LookupEngine,
    LookupFailure,
    Neighbors,
    NumericValidator,
    Offset,
    RegexValidator,
    Result,
    RowValues,
    Selectable,
    Signature,
    Table,
    TidyData,
    Validator,
    Within,
    // Directions
    ABOVE,
    BELOW,
    DOWN,
    LEFT,
    // Constants
    MAX_COLS,
    MAX_ROWS,
    RIGHT,
    UP,
};

// Re-export I/O types
pub use tidy_sheets_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};

use std::path::Path;

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Extension trait for Selectable to acquire a grid from a file
pub trait SelectableExt: Sized {
    /// Open a file and select every cell of it
    fn open<P: AsRef<Path>>(path: P) -> FileResult<Self>;
}

impl SelectableExt for Selectable {
    fn open<P: AsRef<Path>>(path: P) -> FileResult<Selectable> {
        let path = path.as_ref();

        let delimiter = match extension(path).as_deref() {
            Some("csv") | Some("txt") => b',',
            Some("tsv") => b'\t',
            _ => return Err(FileError::UnsupportedFormat(path.display().to_string())),
        };

        let options = CsvReadOptions {
            delimiter,
            ..Default::default()
        };
        Ok(Selectable::new(CsvReader::read_file(path, &options)?))
    }
}

/// Extension trait for TidyData to write its rows to a file
pub trait TidyDataExt {
    /// Save header and rows, format chosen by file extension
    fn save<P: AsRef<Path>>(&mut self, path: P) -> FileResult<()>;
}

impl TidyDataExt for TidyData {
    fn save<P: AsRef<Path>>(&mut self, path: P) -> FileResult<()> {
        let path = path.as_ref();

        match extension(path).as_deref() {
            Some("csv") => Ok(CsvWriter::write_file(
                self,
                path,
                &CsvWriteOptions::default(),
            )?),
            Some("tsv") => Ok(CsvWriter::write_file(
                self,
                path,
                &CsvWriteOptions {
                    delimiter: b'\t',
                    ..Default::default()
                },
            )?),
            _ => Err(FileError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
