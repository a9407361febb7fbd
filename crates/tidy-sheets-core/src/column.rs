//! Output columns

use std::fmt;

use ahash::AHashMap;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::lookup::{Constant, HorizontalCondition, LookupEngine, RowValues};
use crate::validation::Validator;

type Transform = Box<dyn Fn(&str) -> String>;

/// One dimension of the tidy output: a lookup engine plus an optional
/// transform and validator applied to every resolved value
///
/// Transform results are cached per raw value for the lifetime of the
/// column. The cache belongs to this column alone.
pub struct Column {
    engine: LookupEngine,
    apply: Option<Transform>,
    validation: Option<Box<dyn Validator>>,
    cache: AHashMap<String, String>,
}

impl Column {
    /// A column resolved by `engine`, with no transform or validator
    pub fn new(engine: impl Into<LookupEngine>) -> Self {
        Self {
            engine: engine.into(),
            apply: None,
            validation: None,
            cache: AHashMap::new(),
        }
    }

    /// A column with the same value for every observation
    pub fn constant(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Constant::new(label, value))
    }

    /// A column derived from the other values of each row
    pub fn horizontal_condition<F>(label: impl Into<String>, resolver: F, priority: i32) -> Self
    where
        F: Fn(&RowValues) -> Result<String> + 'static,
    {
        Self::new(HorizontalCondition::new(label, resolver, priority))
    }

    /// Transform every resolved value
    pub fn with_apply<F>(mut self, apply: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.apply = Some(Box::new(apply));
        self.cache.clear();
        self
    }

    /// Validate every (transformed) value
    pub fn with_validation(mut self, validator: impl Validator + 'static) -> Self {
        self.validation = Some(Box::new(validator));
        self
    }

    /// Header of this column in the output
    pub fn label(&self) -> &str {
        self.engine.label()
    }

    /// Priority of a conditional column, `None` otherwise
    pub fn priority(&self) -> Option<i32> {
        self.engine.priority()
    }

    /// The lookup behind this column
    pub fn engine(&self) -> &LookupEngine {
        &self.engine
    }

    /// Resolve, transform and validate this column's value for one
    /// observation
    pub fn resolve(&mut self, observation: &Cell, row: &RowValues) -> Result<String> {
        let mut cell = self.engine.resolve(observation, row)?;

        if let Some(apply) = &self.apply {
            let transformed = match self.cache.get(&cell.value) {
                Some(hit) => hit.clone(),
                None => {
                    let fresh = apply(&cell.value);
                    self.cache.insert(cell.value.clone(), fresh.clone());
                    fresh
                }
            };
            cell.value = transformed;
        }

        if let Some(validator) = &self.validation {
            if !validator.matches(&cell) {
                return Err(Error::Validation(vec![format!(
                    "column '{}' for observation {}: {}",
                    self.label(),
                    observation.excel_ref(),
                    validator.message(&cell)
                )]));
            }
        }

        Ok(cell.value)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("engine", &self.engine)
            .field("apply", &self.apply.is_some())
            .field("validation", &self.validation.is_some())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl From<LookupEngine> for Column {
    fn from(engine: LookupEngine) -> Self {
        Column::new(engine)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    use super::*;
    use crate::direction::UP;
    use crate::lookup::Directly;
    use crate::validation::ItemsValidator;

    fn header_column() -> Column {
        let cells = vec![Cell::new(0, 0, "jan"), Cell::new(1, 0, "feb")];
        Column::new(Directly::new("Month", cells, UP).unwrap())
    }

    #[test]
    fn test_transform_is_cached_per_raw_value() {
        let calls = Rc::new(Counter::new(0));
        let seen = Rc::clone(&calls);
        let mut column = header_column().with_apply(move |v| {
            seen.set(seen.get() + 1);
            v.to_uppercase()
        });

        let row = RowValues::new();
        for y in 1..5 {
            assert_eq!(column.resolve(&Cell::new(0, y, ""), &row).unwrap(), "JAN");
            assert_eq!(column.resolve(&Cell::new(1, y, ""), &row).unwrap(), "FEB");
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_caches_are_per_column() {
        let calls = Rc::new(Counter::new(0));
        let make = |calls: &Rc<Counter<u32>>| {
            let seen = Rc::clone(calls);
            header_column().with_apply(move |v| {
                seen.set(seen.get() + 1);
                v.to_string()
            })
        };
        let mut first = make(&calls);
        let mut second = make(&calls);

        let row = RowValues::new();
        first.resolve(&Cell::new(0, 3, ""), &row).unwrap();
        second.resolve(&Cell::new(0, 3, ""), &row).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_validation_runs_on_transformed_value() {
        let mut column = header_column()
            .with_apply(|v| v.to_uppercase())
            .with_validation(ItemsValidator::new(["JAN"]));

        let row = RowValues::new();
        assert!(column.resolve(&Cell::new(0, 2, ""), &row).is_ok());
        let err = column.resolve(&Cell::new(1, 2, ""), &row).unwrap_err();
        match err {
            Error::Validation(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].contains("Month"));
                assert!(messages[0].contains("B3"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_constant_and_condition_constructors() {
        let mut unit = Column::constant("Unit", "GBP");
        let mut measure = Column::horizontal_condition(
            "Measure",
            |row| Ok(format!("{}-total", row.get("Unit")?)),
            2,
        );
        assert_eq!(unit.priority(), None);
        assert_eq!(measure.priority(), Some(2));

        let mut row = RowValues::new();
        let obs = Cell::new(4, 4, "1");
        let value = unit.resolve(&obs, &row).unwrap();
        row.insert(unit.label(), value);
        assert_eq!(measure.resolve(&obs, &row).unwrap(), "GBP-total");
    }
}
