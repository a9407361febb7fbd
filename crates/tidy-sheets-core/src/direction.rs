//! Directions used by traversal and lookup

use std::fmt;

use crate::error::{Error, Result};

/// One of the four axis-aligned headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    /// Towards row 1
    Up,
    /// Away from row 1
    Down,
    /// Towards column A
    Left,
    /// Away from column A
    Right,
}

impl Heading {
    /// The opposite heading
    pub fn inverted(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Unit step as `(dx, dy)`
    pub fn unit(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        }
    }
}

/// A heading with an optional locked number of steps
///
/// ```
/// use tidy_sheets_core::{Direction, RIGHT};
///
/// let three_right = RIGHT.steps(3).unwrap();
/// assert_eq!(three_right.offset(), (3, 0));
/// assert!(three_right.steps(2).is_err());
/// assert_eq!(three_right.to_string(), "right(3)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    heading: Heading,
    magnitude: Option<u32>,
}

/// Towards row 1
pub const UP: Direction = Direction::new(Heading::Up);
/// Alias of [`UP`]
pub const ABOVE: Direction = UP;
/// Away from row 1
pub const DOWN: Direction = Direction::new(Heading::Down);
/// Alias of [`DOWN`]
pub const BELOW: Direction = DOWN;
/// Towards column A
pub const LEFT: Direction = Direction::new(Heading::Left);
/// Away from column A
pub const RIGHT: Direction = Direction::new(Heading::Right);

impl Direction {
    /// A direction without magnitude
    pub const fn new(heading: Heading) -> Self {
        Self {
            heading,
            magnitude: None,
        }
    }

    /// Lock a number of steps onto this direction
    ///
    /// Locking happens once: a direction that already carries a magnitude
    /// cannot be re-parameterized.
    pub fn steps(self, n: u32) -> Result<Direction> {
        if let Some(existing) = self.magnitude {
            return Err(Error::configuration(format!(
                "direction {} already has a magnitude of {}",
                self.heading.name(),
                existing
            )));
        }
        if n == 0 {
            return Err(Error::configuration(format!(
                "direction {} needs a magnitude of at least 1",
                self.heading.name()
            )));
        }
        if i32::try_from(n).is_err() {
            return Err(Error::configuration(format!(
                "direction {} cannot take {} steps, the most is {}",
                self.heading.name(),
                n,
                i32::MAX
            )));
        }
        Ok(Direction {
            heading: self.heading,
            magnitude: Some(n),
        })
    }

    /// The heading
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// The locked number of steps, if any
    pub fn magnitude(&self) -> Option<u32> {
        self.magnitude
    }

    /// Horizontal component of the unit vector
    pub fn dx(&self) -> i32 {
        self.heading.unit().0
    }

    /// Vertical component of the unit vector
    pub fn dy(&self) -> i32 {
        self.heading.unit().1
    }

    /// The full offset: unit vector times magnitude (1 when unset)
    pub fn offset(&self) -> (i32, i32) {
        // steps() keeps every magnitude within i32
        let n = i32::try_from(self.magnitude.unwrap_or(1)).unwrap_or(i32::MAX);
        (self.dx() * n, self.dy() * n)
    }

    /// The opposite direction, keeping any magnitude
    pub fn inverted(&self) -> Direction {
        Direction {
            heading: self.heading.inverted(),
            magnitude: self.magnitude,
        }
    }

    /// Left or right
    pub fn is_horizontal(&self) -> bool {
        matches!(self.heading, Heading::Left | Heading::Right)
    }

    /// Up or down
    pub fn is_vertical(&self) -> bool {
        matches!(self.heading, Heading::Up | Heading::Down)
    }

    /// Heading up
    pub fn is_upwards(&self) -> bool {
        self.heading == Heading::Up
    }

    /// Heading down
    pub fn is_downwards(&self) -> bool {
        self.heading == Heading::Down
    }

    /// Heading left
    pub fn is_left(&self) -> bool {
        self.heading == Heading::Left
    }

    /// Heading right
    pub fn is_right(&self) -> bool {
        self.heading == Heading::Right
    }

    /// Whether travel in this direction decreases the coordinate
    pub(crate) fn is_towards_origin(&self) -> bool {
        matches!(self.heading, Heading::Up | Heading::Left)
    }

    /// Fail when a magnitude is set on an operation that walks to the edge
    pub(crate) fn require_unbounded(&self, operation: &str) -> Result<()> {
        match self.magnitude {
            Some(n) => Err(Error::configuration(format!(
                "{} does not accept a direction with a magnitude (got {}({}))",
                operation,
                self.heading.name(),
                n
            ))),
            None => Ok(()),
        }
    }
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        Direction::new(heading)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.magnitude {
            Some(n) => write!(f, "{}({})", self.heading.name(), n),
            None => f.write_str(self.heading.name()),
        }
    }
}
