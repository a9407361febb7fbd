//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use tidy_sheets_core::TidyData;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write tidy rows to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        tidy: &mut TidyData,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(tidy, file, options)
    }

    /// Write tidy rows to a writer
    ///
    /// Rows are materialized before anything is written.
    pub fn write<W: Write>(
        tidy: &mut TidyData,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        let header = tidy.header();
        let rows = tidy.rows()?;

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(&header)?;
        }
        for row in rows {
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        log::debug!("wrote {} tidy row(s)", rows.len());
        Ok(())
    }

    /// Render tidy rows as a CSV string
    pub fn to_string(tidy: &mut TidyData, options: &CsvWriteOptions) -> CsvResult<String> {
        let mut buffer = Vec::new();
        Self::write(tidy, &mut buffer, options)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
