use std::fmt;

/// A cell on the board, in `(column, row)` coordinates with the origin at the
/// top-left corner.
///
/// Coordinates are signed so that a head that has just left the board can
/// still be represented (and drawn) for the terminal frame of a run.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(super) x: i32,
    pub(super) y: i32,
}

impl Cell {
    pub(super) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed-size board.  Holds no occupancy of its own; what is on the board
/// is derived from the snake and the food.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub(crate) fn new(width: u16, height: u16) -> Grid {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be nonzero, got {width}x{height}"
        );
        Grid { width, height }
    }

    pub(super) fn width(self) -> u16 {
        self.width
    }

    pub(super) fn height(self) -> u16 {
        self.height
    }

    /// The sole authority on whether a cell lies on the board
    pub(super) fn in_bounds(self, cell: Cell) -> bool {
        (0..i32::from(self.width)).contains(&cell.x) && (0..i32::from(self.height)).contains(&cell.y)
    }

    /// Total number of cells on the board
    pub(super) fn len(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// The cell at the center of the board, rounding toward the origin
    pub(super) fn center(self) -> Cell {
        Cell::new(i32::from(self.width / 2), i32::from(self.height / 2))
    }

    /// Row-major index of an in-bounds cell, for flat per-cell tables
    pub(super) fn index(self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let x = usize::try_from(cell.x).ok()?;
        let y = usize::try_from(cell.y).ok()?;
        Some(y * usize::from(self.width) + x)
    }

    /// Iterate over every cell on the board in row-major order
    pub(super) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Cell::new(x, y)))
    }
}
