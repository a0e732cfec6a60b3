use super::grid::Cell;
use enum_map::Enum;
use std::fmt;

/// One of the four axis-aligned headings.
///
/// The declaration order is the neighbor expansion order used by every search
/// in the pathfinder, so reordering the variants changes which of several
/// equally good routes gets picked.
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Iterate over all directions in neighbor expansion order: up, down,
    /// left, right
    pub(super) fn iter() -> impl Iterator<Item = Direction> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    /// Return the cell one step away from `cell` in this direction.  The result
    /// is not checked against any bounds.
    pub(crate) fn step(self, cell: Cell) -> Cell {
        let Cell { x, y } = cell;
        match self {
            Direction::North => Cell::new(x, y - 1),
            Direction::South => Cell::new(x, y + 1),
            Direction::West => Cell::new(x - 1, y),
            Direction::East => Cell::new(x + 1, y),
        }
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "up",
            Direction::South => "down",
            Direction::West => "left",
            Direction::East => "right",
        };
        f.pad(name)
    }
}
