//! Closest-along-an-axis lookup

use super::along;
use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::{Error, LookupFailure, Result};

/// A contiguous, inclusive span of the lookup axis owned by one dimension cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisRange {
    low: u32,
    high: u32,
    owner: usize,
}

impl AxisRange {
    fn contains(&self, offset: u32) -> bool {
        self.low <= offset && offset <= self.high
    }
}

/// Resolves to the dimension cell closest to the observation in
/// `direction`, looking only at the lookup axis
///
/// At construction the axis is partitioned into ranges, one per dimension
/// cell. Looking up or left, a range starts at its owner and runs to just
/// before the next owner; looking down or right, a range ends at its owner
/// and starts just after the previous one. Resolution searches the ranges
/// starting from the last match, since observations usually arrive in
/// reading order.
#[derive(Debug, Clone)]
pub struct Closest {
    label: String,
    direction: Direction,
    cells: Vec<Cell>,
    ranges: Vec<AxisRange>,
    last_index: usize,
}

impl Closest {
    /// Fails when no cells are given or two cells share a breakpoint
    pub fn new(label: impl Into<String>, cells: Vec<Cell>, direction: Direction) -> Result<Self> {
        let label = label.into();
        direction.require_unbounded("a closest lookup")?;

        let mut cells = cells;
        cells.sort_by_key(|c| along(c, &direction));

        if cells.is_empty() {
            return Err(Error::lookup(
                LookupFailure::Missing,
                format!("'{}' has no cells to look up", label),
            ));
        }
        if let Some(pair) = cells
            .windows(2)
            .find(|pair| along(&pair[0], &direction) == along(&pair[1], &direction))
        {
            return Err(Error::lookup(
                LookupFailure::Ambiguous,
                format!(
                    "'{}' has {} and {} on the same {}; a closest lookup {} cannot choose between them",
                    label,
                    pair[0].excel_ref(),
                    pair[1].excel_ref(),
                    if direction.is_horizontal() { "column" } else { "row" },
                    direction
                ),
            ));
        }

        let breakpoints: Vec<u32> = cells.iter().map(|c| along(c, &direction)).collect();
        let last = breakpoints.len() - 1;
        let ranges: Vec<AxisRange> = if direction.is_towards_origin() {
            breakpoints
                .iter()
                .enumerate()
                .map(|(i, &low)| AxisRange {
                    low,
                    high: if i == last {
                        u32::MAX
                    } else {
                        breakpoints[i + 1] - 1
                    },
                    owner: i,
                })
                .collect()
        } else {
            breakpoints
                .iter()
                .enumerate()
                .map(|(i, &high)| AxisRange {
                    low: if i == 0 { 0 } else { breakpoints[i - 1] + 1 },
                    high,
                    owner: i,
                })
                .collect()
        };

        log::debug!(
            "closest lookup '{}' {}: {} range(s)",
            label,
            direction,
            ranges.len()
        );

        Ok(Self {
            label,
            direction,
            cells,
            ranges,
            last_index: 0,
        })
    }

    /// Column label this lookup produces
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Direction searched from each observation
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The owning dimension cell for `observation`
    pub fn resolve(&mut self, observation: &Cell) -> Result<Cell> {
        let offset = along(observation, &self.direction);
        let index = self.find_range(offset).ok_or_else(|| {
            Error::lookup(
                LookupFailure::OutOfRange,
                format!(
                    "'{}' has no cell {} of observation {}",
                    self.label,
                    self.direction,
                    observation.excel_ref()
                ),
            )
        })?;
        self.last_index = index;
        Ok(self.cells[self.ranges[index].owner].clone())
    }

    /// Index of the range containing `offset`
    ///
    /// Starts at the last matched range. The first miss moves one range
    /// towards the offset; later misses jump to the middle of what is left.
    fn find_range(&self, offset: u32) -> Option<usize> {
        let first = self.ranges.first()?;
        let last = self.ranges.last()?;
        if offset < first.low || offset > last.high {
            return None;
        }

        let mut low = 0;
        let mut high = self.ranges.len() - 1;
        let mut index = self.last_index.min(high);
        let mut bumped = false;

        loop {
            let range = &self.ranges[index];
            if range.contains(offset) {
                return Some(index);
            }

            // Ranges tile [first.low, last.high], so a miss always leaves a
            // neighbor on the side of the offset.
            let below = offset < range.low;
            if below {
                high = index - 1;
            } else {
                low = index + 1;
            }

            index = if !bumped {
                bumped = true;
                if below {
                    index - 1
                } else {
                    index + 1
                }
            } else {
                low + (high - low) / 2
            };
        }
    }
}
