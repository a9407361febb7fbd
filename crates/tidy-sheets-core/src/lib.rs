//! # tidy-sheets-core
//!
//! Turns presentation-style spreadsheet grids into tidy data.
//!
//! The pieces, in the order a pipeline uses them:
//! - [`Table`] - an acquired grid of [`Cell`]s with its neighbor graph
//! - [`Selectable`] - a chainable selection over one acquisition
//! - [`LookupEngine`] - resolves, for an observation, the cell holding one
//!   of its dimension values ([`Directly`], [`Closest`], [`Within`],
//!   [`Constant`], [`HorizontalCondition`])
//! - [`Column`] - a lookup engine plus optional transform and validator
//! - [`TidyData`] - one output row per observation
//!
//! ## Example
//!
//! ```rust
//! use tidy_sheets_core::{Column, Selectable, Table, TidyData, DOWN, RIGHT};
//!
//! let sheet = Selectable::new(
//!     Table::from_rows(
//!         "population",
//!         vec![
//!             vec!["", "Male", "Female"],
//!             vec!["Cardiff", "1", "2"],
//!             vec!["Newport", "3", "4"],
//!         ],
//!     )
//!     .unwrap(),
//! );
//!
//! let sexes = sheet.row(1).unwrap().is_not_blank().label_as("Sex");
//! let areas = sheet.column("A").unwrap().is_not_blank().label_as("Area");
//! let observations = sheet.excel_ref("B2:C3").unwrap();
//!
//! let mut tidy = TidyData::new(
//!     &observations,
//!     vec![
//!         Column::new(sexes.attach_directly(DOWN).unwrap()),
//!         Column::new(areas.attach_directly(RIGHT).unwrap()),
//!         Column::constant("Unit", "Persons"),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(tidy.rows().unwrap()[2], vec!["3", "Male", "Newport", "Persons"]);
//! ```

pub mod cell;
pub mod column;
pub mod direction;
pub mod error;
pub mod live_table;
pub mod lookup;
pub mod selection;
pub mod table;
pub mod tidy;
pub mod validation;

// Re-exports for convenience
pub use cell::{BaseCell, Cell, CellFormat, ExcelRef, HorizontalAlignment};
pub use column::Column;
pub use direction::{Direction, Heading, ABOVE, BELOW, DOWN, LEFT, RIGHT, UP};
pub use error::{Error, LookupFailure, Result};
pub use live_table::{Bounds, LiveTable};
pub use lookup::{Closest, Constant, Directly, HorizontalCondition, LookupEngine, RowValues, Within};
pub use selection::{Offset, Selectable};
pub use table::{CellId, Neighbors, Signature, Table};
pub use tidy::TidyData;
pub use validation::{FnValidator, ItemsValidator, NumericValidator, RegexValidator, Validator};

/// Maximum number of rows in a grid (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a grid (Excel limit)
pub const MAX_COLS: u32 = 16_384;
