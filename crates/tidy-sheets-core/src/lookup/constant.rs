//! Constant lookup

use crate::cell::Cell;

/// Yields the same synthetic cell for every observation
#[derive(Debug, Clone)]
pub struct Constant {
    label: String,
    cell: Cell,
}

impl Constant {
    /// Always resolves `label` to `value`
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cell: Cell::synthetic(value),
        }
    }

    /// Column label this lookup produces
    pub fn label(&self) -> &str {
        &self.label
    }

    /// A synthetic cell holding the constant value
    pub fn resolve(&self, _observation: &Cell) -> Cell {
        self.cell.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_ignores_observation() {
        let engine = Constant::new("Unit", "GBP");
        let a = engine.resolve(&Cell::new(0, 0, "1"));
        let b = engine.resolve(&Cell::new(9, 9, "2"));
        assert_eq!(a, b);
        assert_eq!(a.value, "GBP");
        assert!(a.is_synthetic());
    }
}
