//! Band-restricted lookup

use super::{across, along};
use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::{Error, LookupFailure, Result};

/// Resolves to the nearest dimension cell in `direction` among those whose
/// perpendicular coordinate lies within `[start, end]` of the observation's
/// own
///
/// Models labels that only apply locally, such as a subtotal label that
/// covers the few rows around it.
///
/// Candidates are ranked by distance along `direction`, then by distance
/// across it. A tie on both fails with [`LookupFailure::Ambiguous`].
#[derive(Debug, Clone)]
pub struct Within {
    label: String,
    direction: Direction,
    start: i64,
    end: i64,
    /// Sorted by perpendicular coordinate
    cells: Vec<Cell>,
}

impl Within {
    /// Fails for bounded directions or when `start > end`
    pub fn new(
        label: impl Into<String>,
        cells: Vec<Cell>,
        direction: Direction,
        start: i32,
        end: i32,
    ) -> Result<Self> {
        let label = label.into();
        direction.require_unbounded("a within lookup")?;
        if start > end {
            return Err(Error::configuration(format!(
                "within lookup '{}' has start offset {} after end offset {}",
                label, start, end
            )));
        }

        let mut cells = cells;
        cells.sort_by_key(|c| (across(c, &direction), along(c, &direction)));

        log::debug!(
            "within lookup '{}' {} [{}, {}]: {} cell(s)",
            label,
            direction,
            start,
            end,
            cells.len()
        );

        Ok(Self {
            label,
            direction,
            start: start as i64,
            end: end as i64,
            cells,
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

    /// The dimension cell for `observation`
    pub fn resolve(&self, observation: &Cell) -> Result<Cell> {
        let centre = across(observation, &self.direction) as i64;
        let offset = along(observation, &self.direction);

        let lo = (centre + self.start).max(0);
        let hi = centre + self.end;
        let first = self
            .cells
            .partition_point(|c| (across(c, &self.direction) as i64) < lo);
        let band = self.cells[first..]
            .iter()
            .take_while(|c| across(c, &self.direction) as i64 <= hi);

        let towards_origin = self.direction.is_towards_origin();
        let mut best: Option<(&Cell, (u32, i64))> = None;
        let mut tied = false;

        for cell in band {
            let position = along(cell, &self.direction);
            let distance = match towards_origin {
                true if position < offset => offset - position,
                false if position > offset => position - offset,
                _ => continue,
            };
            let key = (distance, (across(cell, &self.direction) as i64 - centre).abs());

            match best {
                Some((_, best_key)) if key > best_key => {}
                Some((_, best_key)) if key == best_key => tied = true,
                _ => {
                    best = Some((cell, key));
                    tied = false;
                }
            }
        }

        match best {
            Some((cell, _)) if !tied => Ok(cell.clone()),
            Some((cell, _)) => Err(Error::lookup(
                LookupFailure::Ambiguous,
                format!(
                    "'{}' has more than one cell as close as {} to observation {}",
                    self.label,
                    cell.excel_ref(),
                    observation.excel_ref()
                ),
            )),
            None => Err(Error::lookup(
                LookupFailure::Failed,
                format!(
                    "'{}' has no cell {} of observation {} within offsets [{}, {}]",
                    self.label,
                    self.direction,
                    observation.excel_ref(),
                    self.start,
                    self.end
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{LEFT, UP};

    fn labels() -> Vec<Cell> {
        vec![
            Cell::new(0, 1, "A2"),
            Cell::new(0, 5, "A6"),
            Cell::new(2, 5, "C6"),
            Cell::new(0, 9, "A10"),
        ]
    }

    #[test]
    fn test_band_restricts_candidates() {
        let engine = Within::new("dim", labels(), LEFT, -1, 1).unwrap();
        assert_eq!(engine.resolve(&Cell::new(4, 2, "")).unwrap().value, "A2");
        assert_eq!(engine.resolve(&Cell::new(4, 6, "")).unwrap().value, "C6");
        let err = engine.resolve(&Cell::new(4, 3, "")).unwrap_err();
        assert_eq!(err.lookup_failure(), Some(LookupFailure::Failed));
    }

    #[test]
    fn test_nearest_in_direction_wins() {
        let engine = Within::new("dim", labels(), LEFT, 0, 0).unwrap();
        assert_eq!(engine.resolve(&Cell::new(5, 5, "")).unwrap().value, "C6");
        assert_eq!(engine.resolve(&Cell::new(1, 5, "")).unwrap().value, "A6");
        assert!(engine.resolve(&Cell::new(0, 5, "")).is_err());
    }

    #[test]
    fn test_perpendicular_distance_breaks_ties() {
        let engine = Within::new("dim", labels(), LEFT, -4, 4).unwrap();
        // A6 and A10 are both one column left of B9 and B8; the closer row wins
        assert_eq!(engine.resolve(&Cell::new(1, 8, "")).unwrap().value, "A10");
        assert_eq!(engine.resolve(&Cell::new(1, 6, "")).unwrap().value, "A6");

        let err = engine.resolve(&Cell::new(1, 7, "")).unwrap_err();
        assert_eq!(err.lookup_failure(), Some(LookupFailure::Ambiguous));
    }

    #[test]
    fn test_vertical_band() {
        let cells = vec![Cell::new(3, 0, "D1"), Cell::new(6, 0, "G1")];
        let engine = Within::new("dim", cells, UP, 0, 2).unwrap();
        assert_eq!(engine.resolve(&Cell::new(1, 4, "")).unwrap().value, "D1");
        assert_eq!(engine.resolve(&Cell::new(4, 4, "")).unwrap().value, "G1");
        assert!(engine.resolve(&Cell::new(7, 4, "")).is_err());
    }

    #[test]
    fn test_rejects_reversed_offsets() {
        let err = Within::new("dim", labels(), LEFT, 2, -2).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
