//! Value-based filters

use std::collections::BTreeMap;

use regex::Regex;

use super::Selectable;
use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::table::CellId;

fn value_matches(value: &str, wanted: &str, strict: bool) -> bool {
    if strict {
        value == wanted
    } else {
        value.contains(wanted)
    }
}

impl Selectable {
    /// Keep the cells for which `predicate` holds
    pub fn filter<F>(&self, predicate: F) -> Selectable
    where
        F: Fn(&Cell) -> bool,
    {
        let kept = self
            .cells
            .iter()
            .copied()
            .filter(|id| predicate(&*self.cell(*id)))
            .collect();
        self.derive(kept)
    }

    /// Keep cells whose value matches `pattern` from its start
    pub fn re(&self, pattern: &str) -> Result<Selectable> {
        let regex = Regex::new(&format!("^(?:{})", pattern))
            .map_err(|e| Error::configuration(format!("invalid pattern '{}': {}", pattern, e)))?;
        Ok(self.filter(|cell| regex.is_match(&cell.value)))
    }

    /// Keep blank cells, ignoring whitespace
    pub fn is_blank(&self) -> Selectable {
        self.is_blank_with(true)
    }

    /// Keep non-blank cells, ignoring whitespace
    pub fn is_not_blank(&self) -> Selectable {
        self.is_not_blank_with(true)
    }

    /// Keep blank cells; whitespace-only values count as blank when `disregard_whitespace`
    pub fn is_blank_with(&self, disregard_whitespace: bool) -> Selectable {
        self.filter(|cell| cell.is_blank(disregard_whitespace))
    }

    /// Keep non-blank cells; whitespace-only values count as blank when `disregard_whitespace`
    pub fn is_not_blank_with(&self, disregard_whitespace: bool) -> Selectable {
        self.filter(|cell| !cell.is_blank(disregard_whitespace))
    }

    /// Keep bold cells
    pub fn is_bold(&self) -> Selectable {
        self.filter(Cell::is_bold)
    }

    /// Keep italic cells
    pub fn is_italic(&self) -> Selectable {
        self.filter(Cell::is_italic)
    }

    /// Keep underlined cells
    pub fn is_underlined(&self) -> Selectable {
        self.filter(Cell::is_underlined)
    }

    /// Cells whose value contains `wanted` (equals it when `strict`)
    pub fn cells_containing_string(&self, wanted: &str, strict: bool) -> Selectable {
        self.filter(|cell| value_matches(&cell.value, wanted, strict))
    }

    /// The single cell whose value contains `wanted` (equals it when `strict`)
    pub fn cell_containing_string(&self, wanted: &str, strict: bool) -> Result<Selectable> {
        let found = self.cells_containing_string(wanted, strict);
        found.assert_one().map_err(|_| {
            Error::Assertion(format!(
                "expected one cell containing '{}', found {}",
                wanted,
                found.len()
            ))
        })?;
        Ok(found)
    }

    /// Every selected cell of each row that holds all of `wanted`
    pub fn rows_containing_strings(&self, wanted: &[&str], strict: bool) -> Selectable {
        self.lines_containing(wanted, strict, |cell| cell.y)
    }

    /// The one row that holds all of `wanted`
    pub fn row_containing_strings(&self, wanted: &[&str], strict: bool) -> Result<Selectable> {
        let rows = self.rows_containing_strings(wanted, strict);
        if rows.is_empty() {
            return Err(Error::Assertion(format!(
                "no row contains all of {:?}",
                wanted
            )));
        }
        rows.assert_single_row()?;
        Ok(rows)
    }

    /// Every selected cell of each column that holds all of `wanted`
    pub fn columns_containing_strings(&self, wanted: &[&str], strict: bool) -> Selectable {
        self.lines_containing(wanted, strict, |cell| cell.x)
    }

    /// The one column that holds all of `wanted`
    pub fn column_containing_strings(&self, wanted: &[&str], strict: bool) -> Result<Selectable> {
        let columns = self.columns_containing_strings(wanted, strict);
        if columns.is_empty() {
            return Err(Error::Assertion(format!(
                "no column contains all of {:?}",
                wanted
            )));
        }
        columns.assert_single_column()?;
        Ok(columns)
    }

    fn lines_containing<K>(&self, wanted: &[&str], strict: bool, key: K) -> Selectable
    where
        K: Fn(&Cell) -> u32,
    {
        let mut lines: BTreeMap<u32, Vec<CellId>> = BTreeMap::new();
        for id in &self.cells {
            lines.entry(key(self.table().cell(*id))).or_default().push(*id);
        }

        let kept = lines
            .into_values()
            .filter(|ids| {
                wanted.iter().all(|w| {
                    ids.iter()
                        .any(|id| value_matches(&self.cell(*id).value, w, strict))
                })
            })
            .flatten()
            .collect();
        self.derive(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Selectable;
    use crate::cell::{Cell, CellFormat};
    use crate::error::Error;
    use crate::table::Table;
    use pretty_assertions::assert_eq;

    fn sheet() -> Selectable {
        Selectable::new(
            Table::from_rows(
                "strings",
                vec![
                    vec!["Region", "Year", "Total"],
                    vec!["North", "2023", " "],
                    vec!["North East", "", "12"],
                    vec!["South", "2024", "9"],
                ],
            )
            .unwrap(),
        )
    }

    fn values(selection: &Selectable) -> Vec<String> {
        selection.cells().into_iter().map(|c| c.value).collect()
    }

    #[test]
    fn test_blank_filters() {
        let sheet = sheet();
        assert_eq!(sheet.is_blank().len(), 2);
        assert_eq!(sheet.is_blank_with(false).len(), 1);
        assert_eq!(sheet.is_not_blank().len(), 10);
    }

    #[test]
    fn test_re_matches_from_start() {
        let sheet = sheet();
        assert_eq!(values(&sheet.re("20").unwrap()), vec!["2023", "2024"]);
        assert_eq!(values(&sheet.re("North").unwrap()), vec!["North", "North East"]);
        assert!(sheet.re("East").unwrap().is_empty());
        assert!(matches!(sheet.re("("), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_containing_string() {
        let sheet = sheet();
        assert_eq!(sheet.cells_containing_string("North", false).len(), 2);
        assert_eq!(
            values(&sheet.cell_containing_string("North", true).unwrap()),
            vec!["North"]
        );
        assert!(matches!(
            sheet.cell_containing_string("North", false),
            Err(Error::Assertion(_))
        ));
    }

    #[test]
    fn test_row_and_column_containing_strings() {
        let sheet = sheet();
        let header = sheet.row_containing_strings(&["Region", "Total"], true).unwrap();
        assert_eq!(values(&header), vec!["Region", "Year", "Total"]);

        let year = sheet.column_containing_strings(&["2023", "2024"], true).unwrap();
        assert_eq!(values(&year), vec!["Year", "2023", "", "2024"]);

        assert_eq!(sheet.rows_containing_strings(&["North"], false).len(), 6);
        assert!(sheet.row_containing_strings(&["North"], false).is_err());
        assert!(sheet.column_containing_strings(&["nope"], false).is_err());
    }

    #[test]
    fn test_format_filters() {
        let table = Table::new(
            "fmt",
            vec![
                Cell::new(0, 0, "Header").with_format(CellFormat::new().bold()),
                Cell::new(1, 0, "note").with_format(CellFormat::new().italic()),
                Cell::new(2, 0, "plain"),
            ],
        )
        .unwrap();
        let sheet = Selectable::new(table);
        assert_eq!(values(&sheet.is_bold()), vec!["Header"]);
        assert_eq!(values(&sheet.is_italic()), vec!["note"]);
        assert!(sheet.is_underlined().is_empty());
    }
}
