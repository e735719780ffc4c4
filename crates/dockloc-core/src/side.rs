//! Split directions.
//!
//! Two vocabularies name the same four directions. [`Side`] is the compass
//! form used when composing locations; [`PathSide`] is the positional form
//! stored in flat path properties. The mapping between them is fixed:
//! `Top <-> North`, `Bottom <-> South`, `Left <-> West`, `Right <-> East`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side of a binary split that a location occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    /// All sides, in declaration order.
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// Whether the split is made by a horizontal line.
    ///
    /// North and South divide a rectangle into a top and a bottom part.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// The side on the other half of the same split.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Lowercase compass name, as used by the fluent builder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional side vocabulary of the flat path encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl From<Side> for PathSide {
    fn from(side: Side) -> Self {
        match side {
            Side::North => Self::Top,
            Side::South => Self::Bottom,
            Side::East => Self::Right,
            Side::West => Self::Left,
        }
    }
}

impl From<PathSide> for Side {
    fn from(side: PathSide) -> Self {
        match side {
            PathSide::Top => Self::North,
            PathSide::Bottom => Self::South,
            PathSide::Right => Self::East,
            PathSide::Left => Self::West,
        }
    }
}
