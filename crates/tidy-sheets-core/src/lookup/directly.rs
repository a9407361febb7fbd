//! Same-row / same-column lookup

use ahash::AHashMap;

use super::{across, along};
use crate::cell::{column_to_letters, Cell};
use crate::direction::Direction;
use crate::error::{Error, LookupFailure, Result};

/// Resolves to the nearest dimension cell on the observation's own row
/// (horizontal directions) or column (vertical directions)
///
/// `direction` points from the observation towards the dimension.
#[derive(Debug, Clone)]
pub struct Directly {
    label: String,
    direction: Direction,
    /// Perpendicular coordinate -> cells sorted along the lookup axis
    buckets: AHashMap<u32, Vec<Cell>>,
}

impl Directly {
    /// Fails for bounded directions
    pub fn new(label: impl Into<String>, cells: Vec<Cell>, direction: Direction) -> Result<Self> {
        let label = label.into();
        direction.require_unbounded("a direct lookup")?;

        let mut buckets: AHashMap<u32, Vec<Cell>> = AHashMap::new();
        for cell in cells {
            buckets.entry(across(&cell, &direction)).or_default().push(cell);
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|c| along(c, &direction));
        }

        log::debug!(
            "direct lookup '{}' {}: {} {}(s) indexed",
            label,
            direction,
            buckets.len(),
            if direction.is_horizontal() { "row" } else { "column" }
        );

        Ok(Self {
            label,
            direction,
            buckets,
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

    /// The nearest dimension cell in line with `observation`
    pub fn resolve(&self, observation: &Cell) -> Result<Cell> {
        let key = across(observation, &self.direction);
        let bucket = self.buckets.get(&key).ok_or_else(|| {
            let line = if self.direction.is_horizontal() {
                format!("row {}", key + 1)
            } else {
                format!("column {}", column_to_letters(key))
            };
            Error::lookup(
                LookupFailure::Missing,
                format!(
                    "'{}' has no cell in {} for observation {}",
                    self.label,
                    line,
                    observation.excel_ref()
                ),
            )
        })?;

        let offset = along(observation, &self.direction);
        let split = bucket.partition_point(|c| along(c, &self.direction) < offset);
        let found = if self.direction.is_towards_origin() {
            split.checked_sub(1).and_then(|i| bucket.get(i))
        } else {
            bucket[split..]
                .iter()
                .find(|c| along(c, &self.direction) > offset)
        };

        found.cloned().ok_or_else(|| {
            Error::lookup(
                LookupFailure::Failed,
                format!(
                    "'{}' has no cell {} of observation {}",
                    self.label,
                    self.direction,
                    observation.excel_ref()
                ),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{DOWN, LEFT, RIGHT, UP};

    fn column_b() -> Vec<Cell> {
        vec![
            Cell::new(1, 0, "B1"),
            Cell::new(1, 3, "B4"),
            Cell::new(1, 6, "B7"),
        ]
    }

    #[test]
    fn test_resolves_nearest_in_direction() {
        let up = Directly::new("dim", column_b(), UP).unwrap();
        assert_eq!(up.resolve(&Cell::new(1, 5, "")).unwrap().value, "B4");
        assert_eq!(up.resolve(&Cell::new(1, 3, "")).unwrap().value, "B1");

        let down = Directly::new("dim", column_b(), DOWN).unwrap();
        assert_eq!(down.resolve(&Cell::new(1, 1, "")).unwrap().value, "B4");
        assert_eq!(down.resolve(&Cell::new(1, 3, "")).unwrap().value, "B7");
    }

    #[test]
    fn test_horizontal_uses_rows() {
        let cells = vec![Cell::new(0, 2, "A3"), Cell::new(4, 2, "E3")];
        let left = Directly::new("dim", cells.clone(), LEFT).unwrap();
        assert_eq!(left.resolve(&Cell::new(3, 2, "")).unwrap().value, "A3");

        let right = Directly::new("dim", cells, RIGHT).unwrap();
        assert_eq!(right.resolve(&Cell::new(3, 2, "")).unwrap().value, "E3");
    }

    #[test]
    fn test_missing_bucket() {
        let up = Directly::new("dim", column_b(), UP).unwrap();
        let err = up.resolve(&Cell::new(2, 5, "")).unwrap_err();
        assert_eq!(err.lookup_failure(), Some(LookupFailure::Missing));
    }

    #[test]
    fn test_nothing_in_direction() {
        let up = Directly::new("dim", column_b(), UP).unwrap();
        let err = up.resolve(&Cell::new(1, 0, "")).unwrap_err();
        assert_eq!(err.lookup_failure(), Some(LookupFailure::Failed));

        let down = Directly::new("dim", column_b(), DOWN).unwrap();
        let err = down.resolve(&Cell::new(1, 9, "")).unwrap_err();
        assert_eq!(err.lookup_failure(), Some(LookupFailure::Failed));
    }

    #[test]
    fn test_rejects_magnitude() {
        assert!(Directly::new("dim", column_b(), UP.steps(2).unwrap()).is_err());
    }
}
