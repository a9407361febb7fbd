//! Cell positions and excel-style references

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A position on the grid (e.g., "A1" is `x = 0, y = 0`)
///
/// `x` is the column index and `y` the row index, both 0-based. Positions
/// order in reading order: row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseCell {
    /// Column index (0-based, A=0, B=1, ...)
    pub x: u32,
    /// Row index (0-based internally, 1-based in excel references)
    pub y: u32,
}

impl BaseCell {
    /// Create a new position
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Parse a position from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use tidy_sheets_core::BaseCell;
    ///
    /// let pos = BaseCell::parse("C5").unwrap();
    /// assert_eq!(pos.x, 2);
    /// assert_eq!(pos.y, 4);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        if split == 0 {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let x = letters_to_column(&s[..split])?;
        let y = row_number_to_y(&s[split..])?;
        Ok(Self { x, y })
    }

    /// The column letters of this position
    pub fn column_letters(&self) -> String {
        column_to_letters(self.x)
    }

    /// The 1-based row number of this position
    pub fn row_number(&self) -> u32 {
        self.y + 1
    }

    /// Format as A1-style string
    pub fn excel_ref(&self) -> String {
        format!("{}{}", self.column_letters(), self.row_number())
    }

    /// Whether this position is strictly below `other` (any column)
    pub fn is_below(&self, other: &BaseCell) -> bool {
        self.y > other.y
    }

    /// Whether this position is strictly above `other` (any column)
    pub fn is_above(&self, other: &BaseCell) -> bool {
        self.y < other.y
    }

    /// Whether this position is strictly right of `other` (any row)
    pub fn is_right_of(&self, other: &BaseCell) -> bool {
        self.x > other.x
    }

    /// Whether this position is strictly left of `other` (any row)
    pub fn is_left_of(&self, other: &BaseCell) -> bool {
        self.x < other.x
    }
}

impl Ord for BaseCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for BaseCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BaseCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.excel_ref())
    }
}

impl FromStr for BaseCell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(x: u32) -> String {
    let mut result = String::new();
    let mut n = x as u64 + 1; // 1-based, there is no zero digit

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidReference("empty column letters".into()));
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidReference(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
        if col > MAX_COLS as u64 {
            return Err(Error::InvalidReference(format!(
                "column '{}' exceeds the maximum of {} columns",
                letters, MAX_COLS
            )));
        }
    }

    Ok((col - 1) as u32)
}

/// Convert a 1-based row number string to a 0-based `y`
pub fn row_number_to_y(digits: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidReference(format!(
            "invalid row number '{}'",
            digits
        )));
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidReference(format!("invalid row number '{}'", digits)))?;

    if row == 0 {
        return Err(Error::InvalidReference("row number must be >= 1".into()));
    }
    if row > MAX_ROWS {
        return Err(Error::InvalidReference(format!(
            "row {} exceeds the maximum of {} rows",
            row, MAX_ROWS
        )));
    }

    Ok(row - 1)
}

/// A parsed excel-style selection reference
///
/// Ranges must be written top-left to bottom-right; `"C5:A1"` is rejected
/// rather than normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcelRef {
    /// A single cell, e.g. `"B7"`
    Cell(BaseCell),
    /// A rectangle of cells, e.g. `"A1:C5"`
    CellRange { start: BaseCell, end: BaseCell },
    /// A whole row (stored as 0-based `y`), e.g. `"4"`
    Row(u32),
    /// Consecutive rows (0-based `y`), e.g. `"4:9"`
    RowRange { start: u32, end: u32 },
    /// A whole column (0-based `x`), e.g. `"D"`
    Column(u32),
    /// Consecutive columns (0-based `x`), e.g. `"D:F"`
    ColumnRange { start: u32, end: u32 },
}

#[derive(Clone, Copy)]
enum RefPart {
    Cell(BaseCell),
    Row(u32),
    Column(u32),
}

impl RefPart {
    fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty reference".into()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(RefPart::Row(row_number_to_y(s)?))
        } else if s.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(RefPart::Column(letters_to_column(s)?))
        } else {
            Ok(RefPart::Cell(BaseCell::parse(s)?))
        }
    }
}

impl ExcelRef {
    /// Parse one of: `"A1"`, `"A1:C5"`, `"3"`, `"3:7"`, `"B"`, `"B:D"`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some((left, right)) = s.split_once(':') else {
            return Ok(match RefPart::parse(s)? {
                RefPart::Cell(cell) => ExcelRef::Cell(cell),
                RefPart::Row(y) => ExcelRef::Row(y),
                RefPart::Column(x) => ExcelRef::Column(x),
            });
        };

        let reversed = || {
            Error::InvalidReference(format!(
                "'{}' must be written from top-left to bottom-right",
                s
            ))
        };

        match (RefPart::parse(left)?, RefPart::parse(right)?) {
            (RefPart::Cell(start), RefPart::Cell(end)) => {
                if start.x > end.x || start.y > end.y {
                    return Err(reversed());
                }
                Ok(ExcelRef::CellRange { start, end })
            }
            (RefPart::Row(start), RefPart::Row(end)) => {
                if start > end {
                    return Err(reversed());
                }
                Ok(ExcelRef::RowRange { start, end })
            }
            (RefPart::Column(start), RefPart::Column(end)) => {
                if start > end {
                    return Err(reversed());
                }
                Ok(ExcelRef::ColumnRange { start, end })
            }
            _ => Err(Error::InvalidReference(format!(
                "'{}' mixes cells, rows and columns",
                s
            ))),
        }
    }

    /// Whether a position falls inside this reference
    pub fn contains(&self, pos: BaseCell) -> bool {
        match *self {
            ExcelRef::Cell(cell) => cell == pos,
            ExcelRef::CellRange { start, end } => {
                (start.x..=end.x).contains(&pos.x) && (start.y..=end.y).contains(&pos.y)
            }
            ExcelRef::Row(y) => pos.y == y,
            ExcelRef::RowRange { start, end } => (start..=end).contains(&pos.y),
            ExcelRef::Column(x) => pos.x == x,
            ExcelRef::ColumnRange { start, end } => (start..=end).contains(&pos.x),
        }
    }
}

impl FromStr for ExcelRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
