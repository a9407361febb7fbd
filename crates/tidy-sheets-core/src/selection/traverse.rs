//! Operations that move along the neighbor graph

use ahash::AHashSet;

use super::Selectable;
use crate::direction::{Direction, Heading};
use crate::error::{Error, LookupFailure, Result};
use crate::table::CellId;

/// An exact offset for [`Selectable::shift`]
///
/// Built from `(dx, dy)` or from a [`Direction`] (magnitude defaults to 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl From<(i32, i32)> for Offset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Offset { dx, dy }
    }
}

impl From<Direction> for Offset {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Offset { dx, dy }
    }
}

impl Selectable {
    /// Add every cell reachable from the selection in `direction`
    ///
    /// Each selected cell's neighbor chain is followed all the way to the
    /// grid boundary.
    pub fn expand(&self, direction: Direction) -> Result<Selectable> {
        direction.require_unbounded("expand")?;
        Ok(self.derive(self.expanded_ids(direction.heading())))
    }

    /// Like [`expand`](Self::expand) but keep only the newly added cells
    pub fn fill(&self, direction: Direction) -> Result<Selectable> {
        direction.require_unbounded("fill")?;
        let selected = self.selected_set();
        let added = self
            .expanded_ids(direction.heading())
            .into_iter()
            .filter(|id| !selected.contains(id))
            .collect();
        Ok(self.derive(added))
    }

    fn expanded_ids(&self, heading: Heading) -> Vec<CellId> {
        let table = self.table();
        let mut seen = self.selected_set();
        let mut out = self.cells.clone();

        for &start in &self.cells {
            let mut current = start;
            // A cell already seen is either selected (its chain gets walked
            // from it) or was reached by an earlier walk in this heading.
            while let Some(next) = table.neighbor(current, heading) {
                if !seen.insert(next) {
                    break;
                }
                out.push(next);
                current = next;
            }
        }

        out
    }

    /// Move the whole selection by an exact offset
    ///
    /// The offset is walked one neighbor at a time, horizontal steps first.
    /// Cells that fall off the grid on the way are dropped; if that leaves
    /// nothing of a non-empty selection, the shift fails.
    pub fn shift(&self, offset: impl Into<Offset>) -> Result<Selectable> {
        let Offset { dx, dy } = offset.into();
        if dx == 0 && dy == 0 {
            return Err(Error::configuration("shift needs a non-zero offset"));
        }

        let horizontal = if dx < 0 { Heading::Left } else { Heading::Right };
        let vertical = if dy < 0 { Heading::Up } else { Heading::Down };
        let table = self.table();

        let shifted: Vec<CellId> = self
            .cells
            .iter()
            .filter_map(|&id| {
                let id = table.walk(id, horizontal, dx.unsigned_abs())?;
                table.walk(id, vertical, dy.unsigned_abs())
            })
            .collect();

        if shifted.is_empty() && !self.cells.is_empty() {
            return Err(Error::out_of_bounds(format!(
                "shifting by ({}, {}) moves every selected cell off the grid",
                dx, dy
            )));
        }

        Ok(self.derive(shifted))
    }

    /// Extend every selected cell by exactly the direction's magnitude
    ///
    /// All intermediate cells are collected. If any cell cannot travel the
    /// full distance the whole operation fails.
    pub fn extrude(&self, direction: Direction) -> Result<Selectable> {
        let steps = direction.magnitude().ok_or_else(|| {
            Error::configuration(format!(
                "extrude needs a direction with a magnitude, e.g. {}.steps(2)",
                direction
            ))
        })?;

        let table = self.table();
        let heading = direction.heading();
        let mut out = self.cells.clone();

        for &start in &self.cells {
            let mut current = start;
            for step in 1..=steps {
                current = table.neighbor(current, heading).ok_or_else(|| {
                    Error::out_of_bounds(format!(
                        "cannot extrude {} from {}: the grid ends after {} step(s)",
                        direction,
                        table.cell(start).excel_ref(),
                        step - 1
                    ))
                })?;
                out.push(current);
            }
        }

        Ok(self.derive(out))
    }

    /// Cross this selection with `other` on the perpendicular axis
    ///
    /// For a vertical direction the result takes its columns from this
    /// selection and its rows from `other`; for a horizontal direction it
    /// takes rows from this selection and columns from `other`. `other`
    /// must lie strictly beyond this selection in `direction`. Cells are
    /// found by walking the neighbor graph, so only existing cells return.
    pub fn waffle(&self, direction: Direction, other: &Selectable) -> Result<Selectable> {
        direction.require_unbounded("waffle")?;
        self.live.ensure_same_acquisition(&other.live)?;

        let (Some(mine), Some(theirs)) = (self.bounds(), other.bounds()) else {
            return Err(Error::out_of_bounds("waffle needs two non-empty selections"));
        };

        let beyond = match direction.heading() {
            Heading::Up => theirs.max_y < mine.min_y,
            Heading::Down => theirs.min_y > mine.max_y,
            Heading::Left => theirs.max_x < mine.min_x,
            Heading::Right => theirs.min_x > mine.max_x,
        };
        if !beyond {
            return Err(Error::lookup(
                LookupFailure::Ambiguous,
                format!(
                    "waffle {} needs the other selection ({}) to lie entirely {} of this one ({})",
                    direction,
                    theirs.excel_ref(),
                    direction,
                    mine.excel_ref()
                ),
            ));
        }

        let table = self.table();
        let targets: AHashSet<u32> = other
            .cells
            .iter()
            .map(|id| {
                let cell = table.cell(*id);
                if direction.is_vertical() {
                    cell.y
                } else {
                    cell.x
                }
            })
            .collect();

        let heading = direction.heading();
        let mut out = Vec::new();
        for &start in &self.cells {
            let mut current = start;
            while let Some(next) = table.neighbor(current, heading) {
                let cell = table.cell(next);
                let axis = if direction.is_vertical() {
                    cell.y
                } else {
                    cell.x
                };
                if targets.contains(&axis) {
                    out.push(next);
                }
                current = next;
            }
        }

        Ok(self.derive(out))
    }
}
