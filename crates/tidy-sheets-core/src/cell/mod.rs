//! Cell-related types and utilities
//!
//! This module contains:
//! - [`BaseCell`] - A cell's position (e.g., "A1")
//! - [`ExcelRef`] - A parsed selection reference (cell, range, row, column)
//! - [`Cell`] - A positioned value with optional [`CellFormat`]

mod address;
mod format;

pub use address::{
    column_to_letters, letters_to_column, row_number_to_y, BaseCell, ExcelRef,
};
pub use format::{CellFormat, HorizontalAlignment};

/// Coordinate used by cells that do not live on any grid
const SYNTHETIC_COORD: u32 = u32::MAX;

/// A positioned value as produced by a reader
///
/// Cells are immutable once a table has been built from them; selections
/// that need a different value (see `spread`) carry an override instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Column index (0-based)
    pub x: u32,
    /// Row index (0-based)
    pub y: u32,
    /// Cell content, empty for blank cells
    pub value: String,
    /// Formatting, if the reader provides it
    pub format: Option<CellFormat>,
}

impl Cell {
    /// Create a new cell without formatting
    pub fn new(x: u32, y: u32, value: impl Into<String>) -> Self {
        Self {
            x,
            y,
            value: value.into(),
            format: None,
        }
    }

    /// Create a cell that is not positioned on any grid
    ///
    /// Used for values that come from constants or conditions rather than
    /// from a lookup.
    pub fn synthetic(value: impl Into<String>) -> Self {
        Self::new(SYNTHETIC_COORD, SYNTHETIC_COORD, value)
    }

    /// Attach formatting
    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Whether this cell was created by [`Cell::synthetic`]
    pub fn is_synthetic(&self) -> bool {
        self.x == SYNTHETIC_COORD && self.y == SYNTHETIC_COORD
    }

    /// The cell's position
    pub fn base(&self) -> BaseCell {
        BaseCell::new(self.x, self.y)
    }

    /// A1-style reference, or `"<synthetic>"` for synthetic cells
    pub fn excel_ref(&self) -> String {
        if self.is_synthetic() {
            "<synthetic>".to_string()
        } else {
            self.base().excel_ref()
        }
    }

    /// Whether the value is empty (optionally ignoring whitespace)
    pub fn is_blank(&self, disregard_whitespace: bool) -> bool {
        if disregard_whitespace {
            self.value.trim().is_empty()
        } else {
            self.value.is_empty()
        }
    }

    /// Whether the cell has bold formatting
    pub fn is_bold(&self) -> bool {
        self.format.as_ref().map(|f| f.bold).unwrap_or(false)
    }

    /// Whether the cell has italic formatting
    pub fn is_italic(&self) -> bool {
        self.format.as_ref().map(|f| f.italic).unwrap_or(false)
    }

    /// Whether the cell has underline formatting
    pub fn is_underlined(&self) -> bool {
        self.format.as_ref().map(|f| f.underline).unwrap_or(false)
    }

    /// Whether both cells sit at the same position
    pub fn matches_xy(&self, other: &Cell) -> bool {
        self.x == other.x && self.y == other.y
    }
}
