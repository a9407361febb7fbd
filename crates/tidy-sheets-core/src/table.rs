//! Grid storage with a neighbor graph
//!
//! A [`Table`] is an arena of cells addressed by [`CellId`]. Cells are stored
//! in reading order, so comparing ids compares positions. Each cell's four
//! neighbors are stored as optional ids rather than references, which keeps
//! the cyclic up/down/left/right graph free of ownership cycles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::{AHashMap, AHashSet};

use crate::cell::{BaseCell, Cell};
use crate::direction::Heading;
use crate::error::{Error, Result};

/// Index of a cell inside its [`Table`]
pub type CellId = usize;

static NEXT_SIGNATURE: AtomicU64 = AtomicU64::new(1);

/// Identifies one acquisition of a grid
///
/// Every call to [`Table::new`] draws a fresh signature; selections can only
/// be combined when their signatures match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(u64);

impl Signature {
    fn next() -> Self {
        Signature(NEXT_SIGNATURE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The ids of a cell's four neighbors (`None` at the grid boundary)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub up: Option<CellId>,
    pub down: Option<CellId>,
    pub left: Option<CellId>,
    pub right: Option<CellId>,
}

impl Neighbors {
    /// The neighbor in the given heading
    pub fn toward(&self, heading: Heading) -> Option<CellId> {
        match heading {
            Heading::Up => self.up,
            Heading::Down => self.down,
            Heading::Left => self.left,
            Heading::Right => self.right,
        }
    }
}

/// An unordered collection of cells from one acquisition
#[derive(Debug)]
pub struct Table {
    name: String,
    signature: Signature,
    cells: Vec<Cell>,
    positions: AHashMap<BaseCell, CellId>,
    neighbors: Vec<Neighbors>,
}

impl Table {
    /// Create a table from cells in any order
    ///
    /// Fails with [`Error::DuplicateCell`] if two cells share a position.
    pub fn new<S: Into<String>>(name: S, mut cells: Vec<Cell>) -> Result<Self> {
        cells.sort_by_key(|c| c.base());

        let mut positions = AHashMap::with_capacity(cells.len());
        for (id, cell) in cells.iter().enumerate() {
            if positions.insert(cell.base(), id).is_some() {
                return Err(Error::DuplicateCell(cell.excel_ref()));
            }
        }

        Ok(Self {
            name: name.into(),
            signature: Signature::next(),
            cells,
            positions,
            neighbors: Vec::new(),
        })
    }

    /// Create a rectangular table from rows of values
    ///
    /// Short rows are padded with blank cells up to the widest row.
    pub fn from_rows<S, R, V>(name: S, rows: R) -> Result<Self>
    where
        S: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut cells = Vec::new();
        let mut width = 0u32;
        let mut height = 0u32;

        for (y, row) in rows.into_iter().enumerate() {
            let mut x = 0u32;
            for value in row {
                cells.push(Cell::new(x, y as u32, value));
                x += 1;
            }
            width = width.max(x);
            height = y as u32 + 1;
        }

        let mut present: AHashSet<BaseCell> = cells.iter().map(|c| c.base()).collect();
        for y in 0..height {
            for x in 0..width {
                if present.insert(BaseCell::new(x, y)) {
                    cells.push(Cell::new(x, y, ""));
                }
            }
        }

        Self::new(name, cells)
    }

    /// Compute every cell's up/down/left/right neighbor
    ///
    /// Runs once; later calls are no-ops.
    pub fn build_neighbor_graph(&mut self) {
        if !self.neighbors.is_empty() || self.cells.is_empty() {
            return;
        }

        let find = |x: Option<u32>, y: Option<u32>| -> Option<CellId> {
            let pos = BaseCell::new(x?, y?);
            self.positions.get(&pos).copied()
        };

        let neighbors: Vec<Neighbors> = self
            .cells
            .iter()
            .map(|cell| Neighbors {
                up: find(Some(cell.x), cell.y.checked_sub(1)),
                down: find(Some(cell.x), cell.y.checked_add(1)),
                left: find(cell.x.checked_sub(1), Some(cell.y)),
                right: find(cell.x.checked_add(1), Some(cell.y)),
            })
            .collect();

        self.neighbors = neighbors;
        log::debug!(
            "built neighbor graph for '{}' ({} cells)",
            self.name,
            self.cells.len()
        );
    }

    /// The table name (sheet or source name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The acquisition signature
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the table has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in reading order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell with the given id
    ///
    /// Ids come from this table; an id from another table is a logic error.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    /// Find the id of the cell at a position
    pub fn find(&self, pos: BaseCell) -> Option<CellId> {
        self.positions.get(&pos).copied()
    }

    /// The neighbor of a cell in a heading
    ///
    /// Returns `None` at the grid boundary or before the graph is built.
    pub fn neighbor(&self, id: CellId, heading: Heading) -> Option<CellId> {
        self.neighbors.get(id).and_then(|n| n.toward(heading))
    }

    /// Follow `steps` neighbors in a heading; `None` if the walk leaves the grid
    pub fn walk(&self, id: CellId, heading: Heading, steps: u32) -> Option<CellId> {
        let mut current = id;
        for _ in 0..steps {
            current = self.neighbor(current, heading)?;
        }
        Some(current)
    }
}
