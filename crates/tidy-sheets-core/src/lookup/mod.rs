//! Lookup engines
//!
//! An engine resolves, for one observation cell, the cell holding that
//! observation's value for one dimension. Positional engines are built
//! from a labelled selection (see the `attach_*` methods on
//! [`Selectable`](crate::Selectable)) and precompute their indices once:
//!
//! - [`Directly`]: nearest cell on the observation's own row or column
//! - [`Closest`]: nearest breakpoint along one axis, any row or column
//! - [`Within`]: nearest cell inside a band around the observation
//!
//! Two engines are not positional: [`Constant`] always yields the same
//! value and [`HorizontalCondition`] derives a value from the other
//! columns already resolved for the observation.

mod closest;
mod condition;
mod constant;
mod directly;
mod within;

pub use closest::Closest;
pub use condition::{HorizontalCondition, RowValues};
pub use constant::Constant;
pub use directly::Directly;
pub use within::Within;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::Result;

/// Coordinate along the lookup direction's axis
pub(crate) fn along(cell: &Cell, direction: &Direction) -> u32 {
    if direction.is_horizontal() {
        cell.x
    } else {
        cell.y
    }
}

/// Coordinate on the axis perpendicular to the lookup direction
pub(crate) fn across(cell: &Cell, direction: &Direction) -> u32 {
    if direction.is_horizontal() {
        cell.y
    } else {
        cell.x
    }
}

/// Any of the lookup engines
#[derive(Debug)]
pub enum LookupEngine {
    Constant(Constant),
    Directly(Directly),
    Closest(Closest),
    Within(Within),
    HorizontalCondition(HorizontalCondition),
}

impl LookupEngine {
    /// The dimension label this engine resolves
    pub fn label(&self) -> &str {
        match self {
            LookupEngine::Constant(e) => e.label(),
            LookupEngine::Directly(e) => e.label(),
            LookupEngine::Closest(e) => e.label(),
            LookupEngine::Within(e) => e.label(),
            LookupEngine::HorizontalCondition(e) => e.label(),
        }
    }

    /// Resolution priority for conditional engines, `None` for the others
    ///
    /// Engines without a priority are resolved first.
    pub fn priority(&self) -> Option<i32> {
        match self {
            LookupEngine::HorizontalCondition(e) => Some(e.priority()),
            _ => None,
        }
    }

    /// Resolve the dimension cell for an observation
    ///
    /// `row` holds the values already resolved for this observation; only
    /// [`HorizontalCondition`] reads it.
    pub fn resolve(&mut self, observation: &Cell, row: &RowValues) -> Result<Cell> {
        match self {
            LookupEngine::Constant(e) => Ok(e.resolve(observation)),
            LookupEngine::Directly(e) => e.resolve(observation),
            LookupEngine::Closest(e) => e.resolve(observation),
            LookupEngine::Within(e) => e.resolve(observation),
            LookupEngine::HorizontalCondition(e) => e.resolve(row),
        }
    }
}

impl From<Constant> for LookupEngine {
    fn from(engine: Constant) -> Self {
        LookupEngine::Constant(engine)
    }
}

impl From<Directly> for LookupEngine {
    fn from(engine: Directly) -> Self {
        LookupEngine::Directly(engine)
    }
}

impl From<Closest> for LookupEngine {
    fn from(engine: Closest) -> Self {
        LookupEngine::Closest(engine)
    }
}

impl From<Within> for LookupEngine {
    fn from(engine: Within) -> Self {
        LookupEngine::Within(engine)
    }
}

impl From<HorizontalCondition> for LookupEngine {
    fn from(engine: HorizontalCondition) -> Self {
        LookupEngine::HorizontalCondition(engine)
    }
}
