//! Prelude module - common imports for tidy-sheets users
//!
//! ```rust
//! use tidy_sheets::prelude::*;
//! ```

pub use crate::{
    Cell,
    Column,
    CsvReader,
    CsvWriter,
    Direction,
    Error,
    FileError,
    // Validators
    ItemsValidator,
    LookupFailure,
    NumericValidator,
    RegexValidator,
    Result,
    RowValues,
    Selectable,
    // Extension traits
    SelectableExt,
    Table,
    TidyData,
    TidyDataExt,
    Validator,
    // Directions
    ABOVE,
    BELOW,
    DOWN,
    LEFT,
    RIGHT,
    UP,
};
