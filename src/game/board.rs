use super::Player;
use crate::error::GameError;

/// Number of same-owner pieces in a straight line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Smallest width or height on which a winning run fits.
pub const MIN_DIMENSION: usize = WIN_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    /// Owner of the piece in this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A cell coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Move `steps` cells along `direction` (negative steps walk backwards).
    /// Returns `None` when the result would have a negative coordinate.
    fn step(self, direction: Direction, steps: isize) -> Option<Position> {
        let (dr, dc) = direction.delta();
        Some(Position {
            row: self.row.checked_add_signed(dr * steps)?,
            col: self.col.checked_add_signed(dc * steps)?,
        })
    }
}

/// The four ways a run can extend from its anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
    /// Towards the bottom-right corner (\)
    DiagonalDownRight,
    /// Towards the bottom-left corner (/)
    DiagonalDownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    /// Row and column delta of a single step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::DiagonalDownRight => "diagonal-down-right",
            Direction::DiagonalDownLeft => "diagonal-down-left",
        }
    }
}

/// Four cells in a line, all owned by the same player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub player: Player,
    pub direction: Direction,
    /// Cells in order, starting from the anchor
    pub cells: [Position; WIN_LENGTH],
}

impl Run {
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major, `height` rows of `width` cells
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GameError::InvalidDimensions { width, height })?;
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; len],
        })
    }

    /// An empty board with the same dimensions
    pub(crate) fn cleared(&self) -> Self {
        Board {
            width: self.width,
            height: self.height,
            cells: vec![Cell::Empty; self.cells.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if `row` or `col` is outside the board; use [`Board::cell`] for
    /// a checked lookup.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} board",
            self.width,
            self.height
        );
        self.cells[row * self.width + col]
    }

    /// Checked lookup, `None` when the position is off the board
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.contains(position)
            .then(|| self.cells[position.row * self.width + position.col])
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height && position.col < self.width
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        !self.get(0, col).is_empty()
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Find the row a piece dropped into `col` would land in: the lowest
    /// empty cell, or `None` when the column is full.
    pub fn find_drop_row(&self, col: usize) -> Result<Option<usize>, GameError> {
        if col >= self.width {
            return Err(GameError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }
        Ok((0..self.height)
            .rev()
            .find(|&row| self.get(row, col).is_empty()))
    }

    /// Write a piece. Callers have already located an empty in-bounds cell.
    pub(crate) fn place(&mut self, position: Position, player: Player) {
        let index = position.row * self.width + position.col;
        debug_assert!(self.cells[index].is_empty(), "cell {position:?} already occupied");
        self.cells[index] = Cell::Occupied(player);
    }

    /// The run anchored at `anchor` going `direction`, if all of its cells
    /// are on the board and owned by the anchor's player.
    pub fn run_from(&self, anchor: Position, direction: Direction) -> Option<Run> {
        let player = self.cell(anchor)?.player()?;
        let mut cells = [anchor; WIN_LENGTH];
        for (step, slot) in cells.iter_mut().enumerate().skip(1) {
            let position = anchor.step(direction, step as isize)?;
            if self.cell(position)? != Cell::Occupied(player) {
                return None;
            }
            *slot = position;
        }
        Some(Run {
            player,
            direction,
            cells,
        })
    }

    /// First winning run that includes `position`.
    ///
    /// A newly placed piece is part of every run it completes, so this only
    /// looks at the anchors from which a run could reach `position`.
    pub fn run_through(&self, position: Position) -> Option<Run> {
        Direction::ALL.into_iter().find_map(|direction| {
            (0..WIN_LENGTH).find_map(|back| {
                let anchor = position.step(direction, -(back as isize))?;
                self.run_from(anchor, direction)
            })
        })
    }

    /// Scan every cell as an anchor and return the first winning run found.
    pub fn find_run(&self) -> Option<Run> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| Position::new(row, col)))
            .find_map(|anchor| {
                Direction::ALL
                    .into_iter()
                    .find_map(|direction| self.run_from(anchor, direction))
            })
    }
}
