//! Cell validators
//!
//! A [`Validator`] decides whether a cell's content is acceptable and
//! explains why not. Selections use validators through
//! [`Selectable::validate`](crate::Selectable::validate), columns apply them
//! to every resolved dimension value.
//!
//! ## Example
//!
//! ```rust
//! use tidy_sheets_core::{Cell, ItemsValidator, Validator};
//!
//! let quarters = ItemsValidator::new(["Q1", "Q2", "Q3", "Q4"]);
//! assert!(quarters.matches(&Cell::new(0, 0, "Q2")));
//! assert!(!quarters.matches(&Cell::new(0, 0, "Q5")));
//! ```

use ahash::AHashSet;
use regex::Regex;

use crate::cell::Cell;
use crate::error::{Error, Result};

/// Decides whether a cell's content is acceptable
pub trait Validator {
    /// Whether the cell passes
    fn matches(&self, cell: &Cell) -> bool;

    /// Why the cell failed
    fn message(&self, cell: &Cell) -> String;
}

/// Accepts values from a fixed set
#[derive(Debug, Clone)]
pub struct ItemsValidator {
    items: AHashSet<String>,
}

impl ItemsValidator {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for ItemsValidator {
    fn matches(&self, cell: &Cell) -> bool {
        self.items.contains(&cell.value)
    }

    fn message(&self, cell: &Cell) -> String {
        format!(
            "'{}' at {} is not one of the {} allowed values",
            cell.value,
            cell.excel_ref(),
            self.items.len()
        )
    }
}

/// Accepts values matching a pattern from their start
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: String,
    regex: Regex,
}

impl RegexValidator {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern))
            .map_err(|e| Error::configuration(format!("invalid pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }
}

impl Validator for RegexValidator {
    fn matches(&self, cell: &Cell) -> bool {
        self.regex.is_match(&cell.value)
    }

    fn message(&self, cell: &Cell) -> String {
        format!(
            "'{}' at {} does not match pattern '{}'",
            cell.value,
            cell.excel_ref(),
            self.pattern
        )
    }
}

/// Accepts values that parse as a number (surrounding whitespace allowed)
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericValidator;

impl Validator for NumericValidator {
    fn matches(&self, cell: &Cell) -> bool {
        cell.value.trim().parse::<f64>().is_ok()
    }

    fn message(&self, cell: &Cell) -> String {
        format!("'{}' at {} is not numeric", cell.value, cell.excel_ref())
    }
}

/// Wraps a closure as a validator
pub struct FnValidator<F> {
    check: F,
    description: String,
}

impl<F> FnValidator<F>
where
    F: Fn(&Cell) -> bool,
{
    /// `description` completes the sentence "the value does not ..."
    pub fn new(description: impl Into<String>, check: F) -> Self {
        Self {
            check,
            description: description.into(),
        }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Cell) -> bool,
{
    fn matches(&self, cell: &Cell) -> bool {
        (self.check)(cell)
    }

    fn message(&self, cell: &Cell) -> String {
        format!(
            "'{}' at {} does not {}",
            cell.value,
            cell.excel_ref(),
            self.description
        )
    }
}
