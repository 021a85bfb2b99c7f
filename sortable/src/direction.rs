//! Sort direction and the per-header direction state machine.

use std::fmt;
use std::str::FromStr;

use crate::error::SortError;
use crate::table::Header;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Ascending order (smallest key first).
    #[default]
    Asc,
    /// Descending order, the exact reversal of ascending.
    Desc,
}

impl Direction {
    /// Both legal directions.
    pub const ALL: [Direction; 2] = [Direction::Asc, Direction::Desc];

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// The declarative tag, `"asc"` or `"desc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Marker class applied to the active header.
    pub fn marker_class(self) -> &'static str {
        match self {
            Direction::Asc => "sorting-asc",
            Direction::Desc => "sorting-desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(SortError::invalid_direction(other)),
        }
    }
}

/// Decide the direction for the next sort of `header`.
///
/// An explicit direction wins. Otherwise an active header flips, an inactive
/// header uses its declared default, and anything else sorts ascending.
pub fn next_direction(header: &Header, explicit: Option<Direction>) -> Direction {
    explicit
        .or_else(|| header.active_direction().map(Direction::toggled))
        .or(header.default_direction)
        .unwrap_or_default()
}
