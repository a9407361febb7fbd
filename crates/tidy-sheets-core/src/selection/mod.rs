//! The selection algebra
//!
//! A [`Selectable`] is a view over one acquisition: a shared [`LiveTable`]
//! (grid, neighbor graph, indices) plus the ids of the currently selected
//! cells. Every operation returns a new view with a new id list; the shared
//! structures are never copied or mutated.
//!
//! ## Example
//!
//! ```rust
//! use tidy_sheets_core::{Selectable, Table, DOWN, RIGHT};
//!
//! let table = Table::from_rows(
//!     "sales",
//!     vec![
//!         vec!["", "2023", "2024"],
//!         vec!["North", "10", "12"],
//!         vec!["South", "7", "9"],
//!     ],
//! )
//! .unwrap();
//! let sheet = Selectable::new(table);
//!
//! let years = sheet.excel_ref("B1:C1").unwrap().label_as("Year");
//! let regions = sheet.excel_ref("A2:A3").unwrap().label_as("Region");
//! let observations = sheet.excel_ref("B2:C3").unwrap();
//!
//! assert_eq!(observations.len(), 4);
//! assert!(years.attach_directly(DOWN).is_ok());
//! assert!(regions.attach_directly(RIGHT).is_ok());
//! ```

mod reference;
mod spread;
mod strings;
mod traverse;

pub use traverse::Offset;

use std::borrow::Cow;
use std::ops::{BitOr, Sub};
use std::rc::Rc;

use ahash::{AHashMap, AHashSet};

use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::live_table::{Bounds, LiveTable};
use crate::lookup::{Closest, Directly, LookupEngine, Within};
use crate::table::{CellId, Signature, Table};
use crate::validation::Validator;

/// A selection of cells from one acquisition
#[derive(Debug, Clone)]
pub struct Selectable {
    live: Rc<LiveTable>,
    cells: Vec<CellId>,
    overrides: Rc<AHashMap<CellId, String>>,
    label: Option<String>,
}

impl Selectable {
    /// Acquire a table and select all of its cells
    pub fn new(table: Table) -> Self {
        let live = Rc::new(LiveTable::new(table));
        let cells = (0..live.pristine().len()).collect();
        Self {
            live,
            cells,
            overrides: Rc::new(AHashMap::new()),
            label: None,
        }
    }

    /// A new view over the same acquisition with a different set of cells
    pub(crate) fn derive(&self, mut cells: Vec<CellId>) -> Self {
        cells.sort_unstable();
        cells.dedup();
        log::trace!("selection {} -> {} cells", self.cells.len(), cells.len());
        Self {
            live: Rc::clone(&self.live),
            cells,
            overrides: Rc::clone(&self.overrides),
            label: self.label.clone(),
        }
    }

    pub(crate) fn with_overrides(&self, overrides: AHashMap<CellId, String>) -> Self {
        Self {
            live: Rc::clone(&self.live),
            cells: self.cells.clone(),
            overrides: Rc::new(overrides),
            label: self.label.clone(),
        }
    }

    pub(crate) fn overrides(&self) -> &AHashMap<CellId, String> {
        &self.overrides
    }

    pub(crate) fn table(&self) -> &Table {
        self.live.pristine()
    }

    pub(crate) fn selected_set(&self) -> AHashSet<CellId> {
        self.cells.iter().copied().collect()
    }

    /// The shared grid and indices
    pub fn live_table(&self) -> &LiveTable {
        &self.live
    }

    /// The acquisition name
    pub fn name(&self) -> &str {
        self.live.name()
    }

    /// The acquisition signature
    pub fn signature(&self) -> Signature {
        self.live.signature()
    }

    /// The label given by [`label_as`](Self::label_as)
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The same selection under a label (needed to attach it as a dimension)
    pub fn label_as(&self, label: impl Into<String>) -> Self {
        let mut labelled = self.clone();
        labelled.label = Some(label.into());
        labelled
    }

    /// Number of selected cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the selection differs in size from the acquired grid
    pub fn selections_made(&self) -> bool {
        self.cells.len() != self.live.pristine().len()
    }

    /// Ids of the selected cells in reading order
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cells
    }

    /// A selected cell with any value override applied
    pub(crate) fn cell(&self, id: CellId) -> Cow<'_, Cell> {
        let cell = self.table().cell(id);
        match self.overrides.get(&id) {
            Some(value) => {
                let mut cell = cell.clone();
                cell.value = value.clone();
                Cow::Owned(cell)
            }
            None => Cow::Borrowed(cell),
        }
    }

    /// The selected cells in reading order
    pub fn cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .map(|id| self.cell(*id).into_owned())
            .collect()
    }

    /// Every cell of the acquisition, regardless of selection
    pub fn pristine_cells(&self) -> &[Cell] {
        self.table().cells()
    }

    /// Bounds of the current selection
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.cells.iter().map(|id| self.table().cell(*id)))
    }

    // === Assertions ===

    /// Fail unless exactly one cell is selected
    pub fn assert_one(&self) -> Result<&Self> {
        self.assert_len(1)
    }

    /// Fail unless exactly `n` cells are selected
    pub fn assert_len(&self, n: usize) -> Result<&Self> {
        if self.cells.len() != n {
            return Err(Error::Assertion(format!(
                "expected {} selected cell(s), found {}",
                n,
                self.cells.len()
            )));
        }
        Ok(self)
    }

    /// Fail unless every selected cell is on the same row
    pub fn assert_single_row(&self) -> Result<&Self> {
        let rows: AHashSet<u32> = self.cells.iter().map(|id| self.table().cell(*id).y).collect();
        if rows.len() != 1 {
            return Err(Error::Assertion(format!(
                "expected cells from a single row, found {} row(s)",
                rows.len()
            )));
        }
        Ok(self)
    }

    /// Fail unless every selected cell is in the same column
    pub fn assert_single_column(&self) -> Result<&Self> {
        let columns: AHashSet<u32> =
            self.cells.iter().map(|id| self.table().cell(*id).x).collect();
        if columns.len() != 1 {
            return Err(Error::Assertion(format!(
                "expected cells from a single column, found {} column(s)",
                columns.len()
            )));
        }
        Ok(self)
    }

    /// The value of the only selected cell
    pub fn lone_value(&self) -> Result<String> {
        self.assert_one()?;
        Ok(self.cell(self.cells[0]).value.clone())
    }

    // === Set operations ===

    /// Cells selected in either selection
    ///
    /// Value overrides from both sides are kept; `self` wins on conflict.
    pub fn union(&self, other: &Selectable) -> Result<Selectable> {
        self.live.ensure_same_acquisition(&other.live)?;

        let mut cells = self.cells.clone();
        cells.extend_from_slice(&other.cells);
        let merged = if other.overrides.is_empty() {
            self.derive(cells)
        } else {
            let mut overrides = (*other.overrides).clone();
            overrides.extend(self.overrides.iter().map(|(k, v)| (*k, v.clone())));
            self.derive(cells).with_overrides(overrides)
        };
        Ok(merged)
    }

    /// Cells selected here but not in `other`
    pub fn difference(&self, other: &Selectable) -> Result<Selectable> {
        self.live.ensure_same_acquisition(&other.live)?;

        let removed = other.selected_set();
        let cells = self
            .cells
            .iter()
            .copied()
            .filter(|id| !removed.contains(id))
            .collect();
        Ok(self.derive(cells))
    }

    // === Validation ===

    /// Check every selected cell against a validator
    ///
    /// With `raise_first_error` the first violation fails immediately;
    /// otherwise all violations are collected into one error.
    pub fn validate(&self, validator: &dyn Validator, raise_first_error: bool) -> Result<&Self> {
        let mut messages = Vec::new();
        for id in &self.cells {
            let cell = self.cell(*id);
            if !validator.matches(&cell) {
                messages.push(validator.message(&cell));
                if raise_first_error {
                    break;
                }
            }
        }

        if messages.is_empty() {
            Ok(self)
        } else {
            Err(Error::Validation(messages))
        }
    }

    // === Binding as a dimension ===

    fn required_label(&self, binding: &str) -> Result<String> {
        self.label.clone().ok_or_else(|| {
            Error::configuration(format!(
                "{} needs a labelled selection, call label_as() first",
                binding
            ))
        })
    }

    /// Bind as a dimension found on the same row or column as each observation
    ///
    /// `direction` points from this selection towards the observations.
    pub fn attach_directly(&self, direction: Direction) -> Result<LookupEngine> {
        let label = self.required_label("attach_directly")?;
        let engine = Directly::new(label, self.cells(), direction.inverted())?;
        Ok(LookupEngine::Directly(engine))
    }

    /// Bind as a dimension resolved to the closest cell along one axis
    ///
    /// `direction` points from this selection towards the observations.
    pub fn attach_closest(&self, direction: Direction) -> Result<LookupEngine> {
        let label = self.required_label("attach_closest")?;
        let engine = Closest::new(label, self.cells(), direction.inverted())?;
        Ok(LookupEngine::Closest(engine))
    }

    /// Bind as a dimension found within a band around each observation
    ///
    /// `start` and `end` are offsets on the axis perpendicular to `direction`,
    /// relative to the observation (e.g. `-2, 0` for "up to two rows above").
    ///
    /// The nearest cell along `direction` wins, then the one nearest across
    /// it. Two cells still level after both are an ambiguous lookup, so a
    /// symmetric band such as `-1, 1` fails for an observation sitting
    /// exactly between two dimension cells.
    pub fn attach_within(&self, direction: Direction, start: i32, end: i32) -> Result<LookupEngine> {
        let label = self.required_label("attach_within")?;
        let engine = Within::new(label, self.cells(), direction.inverted(), start, end)?;
        Ok(LookupEngine::Within(engine))
    }
}

impl From<Table> for Selectable {
    fn from(table: Table) -> Self {
        Selectable::new(table)
    }
}

impl BitOr for &Selectable {
    type Output = Result<Selectable>;

    fn bitor(self, rhs: &Selectable) -> Result<Selectable> {
        self.union(rhs)
    }
}

impl Sub for &Selectable {
    type Output = Result<Selectable>;

    fn sub(self, rhs: &Selectable) -> Result<Selectable> {
        self.difference(rhs)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::direction::{DOWN, RIGHT};
    use crate::validation::ItemsValidator;
    use pretty_assertions::assert_eq;

    /// A grid where every value is its own excel reference
    pub(crate) fn ref_grid(width: u32, height: u32) -> Selectable {
        let rows: Vec<Vec<String>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| crate::cell::BaseCell::new(x, y).excel_ref())
                    .collect()
            })
            .collect();
        Selectable::new(Table::from_rows("grid", rows).unwrap())
    }

    pub(crate) fn refs(selection: &Selectable) -> Vec<String> {
        selection.cells().iter().map(|c| c.excel_ref()).collect()
    }

    #[test]
    fn test_new_selects_everything() {
        let sheet = ref_grid(3, 2);
        assert_eq!(sheet.len(), 6);
        assert!(!sheet.selections_made());
        assert_eq!(sheet.name(), "grid");
    }

    #[test]
    fn test_assertions() {
        let sheet = ref_grid(3, 3);
        let b2 = sheet.excel_ref("B2").unwrap();
        assert!(b2.assert_one().is_ok());
        assert_eq!(b2.lone_value().unwrap(), "B2");

        let row = sheet.excel_ref("2").unwrap();
        assert!(row.assert_len(3).is_ok());
        assert!(row.assert_single_row().is_ok());
        assert!(matches!(row.assert_single_column(), Err(Error::Assertion(_))));
        assert!(matches!(row.lone_value(), Err(Error::Assertion(_))));

        let column = sheet.excel_ref("C").unwrap();
        assert!(column.assert_single_column().is_ok());
        assert!(column.assert_single_row().is_err());
    }

    #[test]
    fn test_union_and_difference() {
        let sheet = ref_grid(3, 3);
        let a = sheet.excel_ref("A1:B1").unwrap();
        let b = sheet.excel_ref("B1:C1").unwrap();

        let union = (&a | &b).unwrap();
        assert_eq!(refs(&union), vec!["A1", "B1", "C1"]);

        let difference = (&union - &a).unwrap();
        assert_eq!(refs(&difference), vec!["C1"]);
        assert!(difference.selections_made());
    }

    #[test]
    fn test_set_operations_require_same_acquisition() {
        let a = ref_grid(2, 2);
        let b = ref_grid(2, 2);
        assert!(matches!(a.union(&b), Err(Error::StructuralMismatch { .. })));
        assert!(matches!(&a - &b, Err(Error::StructuralMismatch { .. })));
    }

    #[test]
    fn test_validate_collects_or_fails_fast() {
        let sheet = ref_grid(3, 1);
        let validator = ItemsValidator::new(["A1"]);

        match sheet.validate(&validator, false) {
            Err(Error::Validation(messages)) => assert_eq!(messages.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
        match sheet.validate(&validator, true) {
            Err(Error::Validation(messages)) => assert_eq!(messages.len(), 1),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(sheet.excel_ref("A1").unwrap().validate(&validator, true).is_ok());
    }

    #[test]
    fn test_attach_requires_label() {
        let sheet = ref_grid(3, 3);
        let header = sheet.excel_ref("1").unwrap();
        assert!(matches!(
            header.attach_directly(DOWN),
            Err(Error::Configuration(_))
        ));

        let labelled = header.label_as("Header");
        assert_eq!(labelled.label(), Some("Header"));
        let engine = labelled.attach_directly(DOWN).unwrap();
        assert_eq!(engine.label(), "Header");
    }

    #[test]
    fn test_attach_inverts_direction() {
        let sheet = ref_grid(3, 3);
        let side = sheet.excel_ref("A").unwrap().label_as("Side");
        let mut engine = side.attach_directly(RIGHT).unwrap();
        let observation = sheet.excel_ref("C2").unwrap().cells().remove(0);
        let resolved = engine
            .resolve(&observation, &crate::lookup::RowValues::new())
            .unwrap();
        assert_eq!(resolved.value, "A2");
    }
}
