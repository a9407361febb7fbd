//! Narrowing a selection by excel-style references

use super::Selectable;
use crate::cell::{column_to_letters, letters_to_column, BaseCell, ExcelRef};
use crate::error::{Error, Result};
use crate::table::CellId;

impl Selectable {
    /// Narrow the selection to an excel-style reference
    ///
    /// Accepts a single cell (`"B7"`), a cell range (`"A1:C5"`), a row
    /// (`"4"`), a row range (`"4:9"`), a column (`"D"`) or a column range
    /// (`"D:F"`). The reference must exist in the acquired grid, and only
    /// cells already in the current selection are returned.
    pub fn excel_ref(&self, reference: &str) -> Result<Selectable> {
        let parsed = ExcelRef::parse(reference)?;
        let candidates = self.pristine_ids(&parsed, reference)?;

        let selected = self.selected_set();
        let narrowed: Vec<CellId> = candidates
            .into_iter()
            .filter(|id| selected.contains(id))
            .collect();

        if narrowed.is_empty() {
            return Err(Error::out_of_bounds(format!(
                "'{}' is not part of the current selection",
                reference
            )));
        }

        Ok(self.derive(narrowed))
    }

    /// Narrow to one row by its 1-based number
    pub fn row(&self, number: u32) -> Result<Selectable> {
        self.excel_ref(&number.to_string())
    }

    /// Narrow to one column by its letters
    pub fn column(&self, letters: &str) -> Result<Selectable> {
        letters_to_column(letters)?;
        self.excel_ref(letters)
    }

    /// Ids of the pristine cells a reference covers, checked against the grid
    fn pristine_ids(&self, parsed: &ExcelRef, reference: &str) -> Result<Vec<CellId>> {
        let live = &self.live;
        let missing = || {
            Error::out_of_bounds(format!(
                "'{}' lies outside the grid ({})",
                reference,
                live.bounds()
                    .map(|b| b.excel_ref())
                    .unwrap_or_else(|| "empty".into())
            ))
        };
        let require = |ids: &[CellId]| {
            if ids.is_empty() {
                Err(missing())
            } else {
                Ok(())
            }
        };

        let ids = match *parsed {
            ExcelRef::Cell(pos) => vec![live.pristine().find(pos).ok_or_else(missing)?],
            ExcelRef::CellRange { start, end } => {
                let bounds = live.bounds().ok_or_else(missing)?;
                if !bounds.contains(start) || !bounds.contains(end) {
                    return Err(missing());
                }
                let mut ids = Vec::new();
                for y in start.y..=end.y {
                    ids.extend(
                        live.at_y(y)
                            .iter()
                            .copied()
                            .filter(|id| (start.x..=end.x).contains(&live.pristine().cell(*id).x)),
                    );
                }
                ids
            }
            ExcelRef::Row(y) => {
                let ids = live.row_number(y + 1);
                require(ids)?;
                ids.to_vec()
            }
            ExcelRef::RowRange { start, end } => {
                require(live.at_y(start))?;
                require(live.at_y(end))?;
                (start..=end).flat_map(|y| live.at_y(y).iter().copied()).collect()
            }
            ExcelRef::Column(x) => {
                let ids = live.column_letter(&column_to_letters(x));
                require(ids)?;
                ids.to_vec()
            }
            ExcelRef::ColumnRange { start, end } => {
                require(live.at_x(start))?;
                require(live.at_x(end))?;
                (start..=end).flat_map(|x| live.at_x(x).iter().copied()).collect()
            }
        };

        Ok(ids)
    }

    /// Whether the current selection contains the cell at a position
    pub fn contains(&self, pos: BaseCell) -> bool {
        self.table()
            .find(pos)
            .map(|id| self.cells.binary_search(&id).is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{ref_grid, refs};
    use crate::cell::BaseCell;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_range_on_wide_grid() {
        let sheet = ref_grid(26, 100);
        let block = sheet.excel_ref("A1:C5").unwrap();
        assert_eq!(block.len(), 15);

        let bounds = block.bounds().unwrap();
        assert_eq!((bounds.min_x, bounds.max_x), (0, 2));
        assert_eq!((bounds.min_y, bounds.max_y), (0, 4));

        assert!(matches!(
            sheet.excel_ref("C5:A1"),
            Err(Error::InvalidReference(_))
        ));
    }

    #[test]
    fn test_rows_and_columns() {
        let sheet = ref_grid(3, 4);
        assert_eq!(refs(&sheet.excel_ref("2").unwrap()), vec!["A2", "B2", "C2"]);
        assert_eq!(refs(&sheet.row(4).unwrap()), vec!["A4", "B4", "C4"]);
        assert_eq!(refs(&sheet.excel_ref("B").unwrap()), vec!["B1", "B2", "B3", "B4"]);
        assert_eq!(refs(&sheet.column("c").unwrap()), vec!["C1", "C2", "C3", "C4"]);
        assert_eq!(sheet.excel_ref("2:3").unwrap().len(), 6);
        assert_eq!(sheet.excel_ref("B:C").unwrap().len(), 8);
        assert!(sheet.column("1").is_err());
    }

    #[test]
    fn test_outside_grid() {
        let sheet = ref_grid(3, 3);
        assert!(matches!(sheet.excel_ref("D1"), Err(Error::OutOfBounds(_))));
        assert!(matches!(sheet.excel_ref("4"), Err(Error::OutOfBounds(_))));
        assert!(matches!(sheet.excel_ref("A1:D4"), Err(Error::OutOfBounds(_))));
        assert!(matches!(sheet.excel_ref("B:Z"), Err(Error::OutOfBounds(_))));
    }

    #[test]
    fn test_narrows_current_selection() {
        let sheet = ref_grid(4, 4);
        let top_left = sheet.excel_ref("A1:B2").unwrap();

        assert_eq!(refs(&top_left.excel_ref("B").unwrap()), vec!["B1", "B2"]);
        assert_eq!(refs(&top_left.excel_ref("B2:D4").unwrap()), vec!["B2"]);
        assert!(matches!(
            top_left.excel_ref("C3"),
            Err(Error::OutOfBounds(_))
        ));
        assert!(top_left.contains(BaseCell::new(1, 1)));
        assert!(!top_left.contains(BaseCell::new(2, 2)));
    }
}
