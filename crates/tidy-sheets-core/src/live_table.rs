//! An acquired grid with its read-only axis indices

use ahash::AHashMap;

use crate::cell::{column_to_letters, BaseCell, Cell};
use crate::error::{Error, Result};
use crate::table::{CellId, Signature, Table};

/// The rectangle covering a set of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Bounds {
    /// Compute the bounds of some cells, `None` when there are none
    pub fn of<'a, I>(cells: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        cells.into_iter().fold(None, |acc, cell| {
            Some(match acc {
                None => Bounds {
                    min_x: cell.x,
                    max_x: cell.x,
                    min_y: cell.y,
                    max_y: cell.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(cell.x),
                    max_x: b.max_x.max(cell.x),
                    min_y: b.min_y.min(cell.y),
                    max_y: b.max_y.max(cell.y),
                },
            })
        })
    }

    /// Whether a position lies inside the rectangle
    pub fn contains(&self, pos: BaseCell) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_y..=self.max_y).contains(&pos.y)
    }

    /// A1-style reference of the covering rectangle
    pub fn excel_ref(&self) -> String {
        let start = BaseCell::new(self.min_x, self.min_y);
        let end = BaseCell::new(self.max_x, self.max_y);
        if start == end {
            start.excel_ref()
        } else {
            format!("{}:{}", start, end)
        }
    }
}

/// A pristine grid shared by every selection derived from one acquisition
///
/// The neighbor graph is built at construction together with four indices:
/// column letter, row number, `x` and `y`. None of them change afterwards,
/// so a `LiveTable` is safe to alias from any number of selections.
#[derive(Debug)]
pub struct LiveTable {
    pristine: Table,
    by_column_letter: AHashMap<String, Vec<CellId>>,
    by_row_number: AHashMap<u32, Vec<CellId>>,
    by_x: AHashMap<u32, Vec<CellId>>,
    by_y: AHashMap<u32, Vec<CellId>>,
    bounds: Option<Bounds>,
}

impl LiveTable {
    /// Build the graph and indices for an acquired table
    pub fn new(mut pristine: Table) -> Self {
        pristine.build_neighbor_graph();

        let mut by_column_letter: AHashMap<String, Vec<CellId>> = AHashMap::new();
        let mut by_row_number: AHashMap<u32, Vec<CellId>> = AHashMap::new();
        let mut by_x: AHashMap<u32, Vec<CellId>> = AHashMap::new();
        let mut by_y: AHashMap<u32, Vec<CellId>> = AHashMap::new();

        for (id, cell) in pristine.cells().iter().enumerate() {
            by_x.entry(cell.x).or_default().push(id);
            by_y.entry(cell.y).or_default().push(id);
            by_row_number.entry(cell.y + 1).or_default().push(id);
        }
        for (x, ids) in &by_x {
            by_column_letter.insert(column_to_letters(*x), ids.clone());
        }

        let bounds = Bounds::of(pristine.cells());
        log::debug!(
            "acquired '{}' with {} cells spanning {}",
            pristine.name(),
            pristine.len(),
            bounds.map(|b| b.excel_ref()).unwrap_or_else(|| "nothing".into())
        );

        Self {
            pristine,
            by_column_letter,
            by_row_number,
            by_x,
            by_y,
            bounds,
        }
    }

    /// The table as acquired
    pub fn pristine(&self) -> &Table {
        &self.pristine
    }

    /// The acquisition signature
    pub fn signature(&self) -> Signature {
        self.pristine.signature()
    }

    /// The acquisition name
    pub fn name(&self) -> &str {
        self.pristine.name()
    }

    /// Bounds of the pristine grid
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Cells in a column by letters (e.g. `"C"`), in reading order
    pub fn column_letter(&self, letters: &str) -> &[CellId] {
        self.by_column_letter
            .get(&letters.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cells in a row by 1-based row number, in reading order
    pub fn row_number(&self, number: u32) -> &[CellId] {
        self.by_row_number
            .get(&number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cells with the given `x`
    pub fn at_x(&self, x: u32) -> &[CellId] {
        self.by_x.get(&x).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cells with the given `y`
    pub fn at_y(&self, y: u32) -> &[CellId] {
        self.by_y.get(&y).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fail unless both live tables come from the same acquisition
    pub fn ensure_same_acquisition(&self, other: &LiveTable) -> Result<()> {
        if self.signature() != other.signature() {
            return Err(Error::StructuralMismatch {
                left: self.signature(),
                right: other.signature(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Heading;

    fn live() -> LiveTable {
        LiveTable::new(
            Table::from_rows("live", vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]).unwrap(),
        )
    }

    #[test]
    fn test_graph_is_built() {
        let live = live();
        let a = live.pristine().find(BaseCell::new(0, 0)).unwrap();
        assert!(live.pristine().neighbor(a, Heading::Right).is_some());
    }

    #[test]
    fn test_indices() {
        let live = live();
        let values = |ids: &[CellId]| -> Vec<String> {
            ids.iter()
                .map(|id| live.pristine().cell(*id).value.clone())
                .collect()
        };

        assert_eq!(values(live.column_letter("B")), vec!["b", "e"]);
        assert_eq!(values(live.column_letter("b")), vec!["b", "e"]);
        assert_eq!(values(live.row_number(2)), vec!["d", "e", "f"]);
        assert_eq!(values(live.at_x(2)), vec!["c", "f"]);
        assert_eq!(values(live.at_y(0)), vec!["a", "b", "c"]);
        assert!(live.row_number(3).is_empty());
        assert!(live.column_letter("Z").is_empty());
    }

    #[test]
    fn test_bounds() {
        let live = live();
        let bounds = live.bounds().unwrap();
        assert_eq!(bounds.excel_ref(), "A1:C2");
        assert!(bounds.contains(BaseCell::new(2, 1)));
        assert!(!bounds.contains(BaseCell::new(3, 1)));
    }

    #[test]
    fn test_signature_gate() {
        let a = live();
        let b = live();
        assert!(a.ensure_same_acquisition(&a).is_ok());
        assert!(matches!(
            a.ensure_same_acquisition(&b),
            Err(Error::StructuralMismatch { .. })
        ));
    }
}
