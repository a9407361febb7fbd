//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use tidy_sheets_core::Table;

/// CSV file reader
///
/// Every record becomes a grid row and every field a cell; nothing is
/// treated as a header. Short records are padded with blank cells so the
/// grid is rectangular.
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a table named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Table> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let mut options = options.clone();
        if options.sheet_name.is_none() {
            options.sheet_name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        Self::read(file, &options)
    }

    /// Read CSV from a reader into a table
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let name = options
            .sheet_name
            .clone()
            .unwrap_or_else(|| "Sheet1".to_string());
        log::debug!("read {} csv record(s) into '{}'", rows.len(), name);

        Ok(Table::from_rows(name, rows)?)
    }
}
