//! Conditional lookup over already-resolved row values

use std::fmt;

use ahash::AHashMap;

use crate::cell::Cell;
use crate::error::{Error, LookupFailure, Result};

/// Column label -> resolved value for one observation
#[derive(Debug, Clone, Default)]
pub struct RowValues {
    values: AHashMap<String, String>,
}

impl RowValues {
    /// An empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value resolved for `label`, replacing any earlier one
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.values.insert(label.into(), value.into());
    }

    /// Value resolved for `label`
    ///
    /// A missing label usually means a conditional column was resolved
    /// before the column it depends on.
    pub fn get(&self, label: &str) -> Result<&str> {
        self.values.get(label).map(String::as_str).ok_or_else(|| {
            Error::lookup(
                LookupFailure::Missing,
                format!(
                    "no value for '{}' in this row yet; if it is produced by another \
                     conditional column, give that column a lower priority so it \
                     resolves first",
                    label
                ),
            )
        })
    }

    /// Whether `label` has been resolved yet
    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    /// Number of resolved labels
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True before anything is resolved
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

type Resolver = Box<dyn Fn(&RowValues) -> Result<String>>;

/// Derives a dimension value from the other values of the observation's row
///
/// Conditional columns are resolved after every positional column, in
/// ascending `priority`, so a resolver may read values produced by
/// conditional columns with a lower priority.
///
/// ```
/// use tidy_sheets_core::{HorizontalCondition, RowValues};
///
/// let quarter = HorizontalCondition::new(
///     "Quarter",
///     |row| Ok(match row.get("Month")? {
///         "Jan" | "Feb" | "Mar" => "Q1".to_string(),
///         _ => "Later".to_string(),
///     }),
///     0,
/// );
///
/// let mut row = RowValues::new();
/// row.insert("Month", "Feb");
/// assert_eq!(quarter.resolve(&row).unwrap().value, "Q1");
/// ```
pub struct HorizontalCondition {
    label: String,
    resolver: Resolver,
    priority: i32,
}

impl HorizontalCondition {
    /// `priority` orders this condition among the other conditional columns
    pub fn new<F>(label: impl Into<String>, resolver: F, priority: i32) -> Self
    where
        F: Fn(&RowValues) -> Result<String> + 'static,
    {
        Self {
            label: label.into(),
            resolver: Box::new(resolver),
            priority,
        }
    }

    /// Column label this condition produces
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lower priorities resolve first
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Run the resolver over the values already in `row`
    pub fn resolve(&self, row: &RowValues) -> Result<Cell> {
        let value = (self.resolver)(row).map_err(|err| match err {
            Error::Lookup { kind, message } => Error::lookup(
                kind,
                format!("condition '{}': {}", self.label, message),
            ),
            other => other,
        })?;
        Ok(Cell::synthetic(value))
    }
}

impl fmt::Debug for HorizontalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HorizontalCondition")
            .field("label", &self.label)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_from_row() {
        let engine = HorizontalCondition::new(
            "Measure",
            |row| Ok(format!("{} count", row.get("Unit")?)),
            1,
        );
        let mut row = RowValues::new();
        row.insert("Unit", "Person");

        let cell = engine.resolve(&row).unwrap();
        assert_eq!(cell.value, "Person count");
        assert!(cell.is_synthetic());
        assert_eq!(engine.priority(), 1);
    }

    #[test]
    fn test_missing_value_mentions_priority() {
        let engine = HorizontalCondition::new("Measure", |row| Ok(row.get("Unit")?.to_string()), 0);
        let err = engine.resolve(&RowValues::new()).unwrap_err();
        assert_eq!(err.lookup_failure(), Some(LookupFailure::Missing));
        let message = err.to_string();
        assert!(message.contains("Measure"));
        assert!(message.contains("priority"));
    }

    #[test]
    fn test_resolver_errors_pass_through() {
        let engine = HorizontalCondition::new(
            "Measure",
            |_| Err(Error::configuration("unsupported row")),
            0,
        );
        let err = engine.resolve(&RowValues::new()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
