//! Tidy output assembly
//!
//! [`TidyData`] walks the observation cells in reading order and resolves
//! every [`Column`] for each, producing one output row per observation:
//! the observation value followed by one value per column.
//!
//! ## Example
//!
//! ```rust
//! use tidy_sheets_core::{Column, Selectable, Table, TidyData, DOWN, RIGHT};
//!
//! let sheet = Selectable::new(
//!     Table::from_rows(
//!         "sales",
//!         vec![
//!             vec!["", "2023", "2024"],
//!             vec!["North", "10", "12"],
//!             vec!["South", "7", "9"],
//!         ],
//!     )
//!     .unwrap(),
//! );
//!
//! let years = sheet.excel_ref("B1:C1").unwrap().label_as("Year");
//! let regions = sheet.excel_ref("A2:A3").unwrap().label_as("Region");
//! let observations = sheet.excel_ref("B2:C3").unwrap();
//!
//! let mut tidy = TidyData::new(
//!     &observations,
//!     vec![
//!         Column::new(years.attach_directly(DOWN).unwrap()),
//!         Column::new(regions.attach_directly(RIGHT).unwrap()),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(tidy.header(), vec!["Value", "Year", "Region"]);
//! let rows = tidy.rows().unwrap();
//! assert_eq!(rows[0], vec!["10", "2023", "North"]);
//! assert_eq!(rows[3], vec!["9", "2024", "South"]);
//! ```

use ahash::AHashSet;

use crate::cell::Cell;
use crate::column::Column;
use crate::error::{Error, Result};
use crate::lookup::RowValues;
use crate::selection::Selectable;
use crate::validation::Validator;

type Transform = Box<dyn Fn(&str) -> String>;

/// Observations joined with their dimension values
pub struct TidyData {
    observations: Vec<Cell>,
    columns: Vec<Column>,
    observation_label: String,
    observation_apply: Option<Transform>,
    observation_validation: Option<Box<dyn Validator>>,
    dropped: AHashSet<String>,
    rows: Option<Vec<Vec<String>>>,
}

impl TidyData {
    /// Fails when two columns share a label
    pub fn new(observations: &Selectable, columns: Vec<Column>) -> Result<Self> {
        let mut seen = AHashSet::new();
        for column in &columns {
            if !seen.insert(column.label().to_string()) {
                return Err(Error::configuration(format!(
                    "more than one column is labelled '{}'",
                    column.label()
                )));
            }
        }

        Ok(Self {
            observations: observations.cells(),
            columns,
            observation_label: "Value".to_string(),
            observation_apply: None,
            observation_validation: None,
            dropped: AHashSet::new(),
            rows: None,
        })
    }

    /// Header of the observation column, `"Value"` unless set
    pub fn with_observation_label(mut self, label: impl Into<String>) -> Self {
        self.observation_label = label.into();
        self.rows = None;
        self
    }

    /// Transform every observation value
    pub fn with_observation_apply<F>(mut self, apply: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.observation_apply = Some(Box::new(apply));
        self.rows = None;
        self
    }

    /// Validate every (transformed) observation value
    pub fn with_observation_validation(mut self, validator: impl Validator + 'static) -> Self {
        self.observation_validation = Some(Box::new(validator));
        self.rows = None;
        self
    }

    /// Leave columns out of the output
    ///
    /// Dropped columns are still resolved, so conditional columns can read
    /// them.
    pub fn with_drop<I, S>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            let label = label.into();
            if !self.columns.iter().any(|c| c.label() == label) {
                return Err(Error::configuration(format!(
                    "cannot drop '{}': no such column",
                    label
                )));
            }
            self.dropped.insert(label);
        }
        self.rows = None;
        Ok(self)
    }

    /// Number of output rows, one per observation
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when there are no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Header of the observation column
    pub fn observation_label(&self) -> &str {
        &self.observation_label
    }

    /// Every column, dropped ones included
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Output header: the observation label then each kept column label
    pub fn header(&self) -> Vec<String> {
        std::iter::once(self.observation_label.clone())
            .chain(
                self.columns
                    .iter()
                    .map(Column::label)
                    .filter(|label| !self.dropped.contains(*label))
                    .map(str::to_string),
            )
            .collect()
    }

    /// The output rows, materialized on first call and cached
    pub fn rows(&mut self) -> Result<&[Vec<String>]> {
        if self.rows.is_none() {
            let rows = self.materialize()?;
            self.rows = Some(rows);
        }
        Ok(self.rows.as_deref().unwrap_or_default())
    }

    fn materialize(&mut self) -> Result<Vec<Vec<String>>> {
        if self.columns.iter().any(|c| c.label() == self.observation_label) {
            return Err(Error::configuration(format!(
                "observation label '{}' is also a column label",
                self.observation_label
            )));
        }

        // Positional columns first, then conditions by ascending priority
        let mut order: Vec<usize> = (0..self.columns.len()).collect();
        order.sort_by_key(|&i| match self.columns[i].priority() {
            None => (0, 0),
            Some(priority) => (1, priority),
        });

        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !self.dropped.contains(c.label()))
            .collect();

        log::debug!(
            "materializing {} observation(s) over {} column(s)",
            self.observations.len(),
            self.columns.len()
        );

        let mut rows = Vec::with_capacity(self.observations.len());
        let mut resolved = vec![String::new(); self.columns.len()];

        for observation in &self.observations {
            let mut value = match &self.observation_apply {
                Some(apply) => apply(&observation.value),
                None => observation.value.clone(),
            };
            if let Some(validator) = &self.observation_validation {
                let checked = Cell {
                    value,
                    ..observation.clone()
                };
                if !validator.matches(&checked) {
                    return Err(Error::Validation(vec![validator.message(&checked)]));
                }
                value = checked.value;
            }

            let mut row_values = RowValues::new();
            row_values.insert(self.observation_label.clone(), value.clone());

            for &i in &order {
                let column = &mut self.columns[i];
                let resolved_value = column.resolve(observation, &row_values)?;
                row_values.insert(column.label(), resolved_value.clone());
                resolved[i] = resolved_value;
            }

            let mut row = Vec::with_capacity(resolved.len() + 1);
            row.push(value);
            row.extend(
                resolved
                    .iter()
                    .zip(&keep)
                    .filter(|(_, keep)| **keep)
                    .map(|(v, _)| v.clone()),
            );
            rows.push(row);
        }

        log::debug!("materialized {} row(s)", rows.len());
        Ok(rows)
    }
}

impl std::fmt::Debug for TidyData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TidyData")
            .field("observations", &self.observations.len())
            .field("columns", &self.columns)
            .field("observation_label", &self.observation_label)
            .field("dropped", &self.dropped)
            .field("materialized", &self.rows.is_some())
            .finish()
    }
}
