//! Board representation for the 3x3 sliding-tile puzzle.
//!
//! A [`Board`] is a validated permutation of the blank and the tiles 1..=8,
//! stored row-major. Boards are plain values: every move produces a new board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width (and height) of the grid.
pub const GRID_WIDTH: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_WIDTH;

/// Cell value used for the blank.
pub const BLANK: u8 = 0;

/// Highest tile value.
pub const MAX_TILE: u8 = (CELL_COUNT - 1) as u8;

/// Reasons a cell sequence is not a well-formed board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 9 cells, got {0}")]
    WrongCellCount(usize),
    #[error("tile {0} is out of range 1..=8")]
    TileOutOfRange(u8),
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
    #[error("board has no blank cell")]
    MissingBlank,
    #[error("board has {0} blank cells, expected exactly one")]
    MultipleBlanks(usize),
    #[error("invalid cell token {0:?}")]
    InvalidToken(String),
}

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Expansion order used by the solver.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, column) offset of the blank for this move.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn inverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Row and column of a cell index.
pub fn row_col(index: usize) -> (usize, usize) {
    (index / GRID_WIDTH, index % GRID_WIDTH)
}

/// A complete puzzle configuration.
///
/// Equality and hashing are structural over the cells. The blank position is
/// cached alongside the cells and is always derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawCell>", into = "Vec<RawCell>")]
pub struct Board {
    cells: [u8; CELL_COUNT],
    blank: u8,
}

impl Board {
    /// Build a board from row-major cells, using [`BLANK`] for the empty cell.
    pub fn new(cells: &[u8]) -> Result<Self, BoardError> {
        if cells.len() != CELL_COUNT {
            return Err(BoardError::WrongCellCount(cells.len()));
        }

        if let Some(&tile) = cells.iter().find(|&&c| c > MAX_TILE) {
            return Err(BoardError::TileOutOfRange(tile));
        }

        let blanks = cells.iter().filter(|&&c| c == BLANK).count();
        match blanks {
            0 => return Err(BoardError::MissingBlank),
            1 => {}
            n => return Err(BoardError::MultipleBlanks(n)),
        }

        let mut seen = [false; CELL_COUNT];
        for &tile in cells {
            if seen[tile as usize] {
                return Err(BoardError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
        }

        let mut array = [BLANK; CELL_COUNT];
        array.copy_from_slice(cells);
        let blank = cells.iter().position(|&c| c == BLANK).unwrap_or_default() as u8;

        Ok(Self { cells: array, blank })
    }

    /// The goal layout shared by the experiments: blank first, then 1..=8.
    pub fn canonical_goal() -> Self {
        Self {
            cells: [BLANK, 1, 2, 3, 4, 5, 6, 7, 8],
            blank: 0,
        }
    }

    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Position of the blank cell.
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    /// Tile at `index`, or `None` for the blank.
    pub fn tile_at(&self, index: usize) -> Option<u8> {
        match self.cells.get(index) {
            Some(&BLANK) | None => None,
            Some(&tile) => Some(tile),
        }
    }

    /// Iterate over `(position, tile)` for every non-blank cell.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != BLANK)
            .map(|(i, &c)| (i, c))
    }

    /// Slide the blank one cell in `direction`.
    ///
    /// Returns `None` if that would leave the grid.
    pub fn apply_move(&self, direction: Direction) -> Option<Board> {
        let (row, col) = row_col(self.blank_index());
        let (d_row, d_col) = direction.delta();
        let target_row = row.checked_add_signed(d_row)?;
        let target_col = col.checked_add_signed(d_col)?;
        if target_row >= GRID_WIDTH || target_col >= GRID_WIDTH {
            return None;
        }

        let target = target_row * GRID_WIDTH + target_col;
        let mut cells = self.cells;
        cells.swap(self.blank_index(), target);
        Some(Board {
            cells,
            blank: target as u8,
        })
    }

    /// All boards one move away, paired with the move, in [`Direction::ALL`] order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Board)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.apply_move(d).map(|b| (d, b)))
    }
}

impl fmt::Display for Board {
    /// `1 2 b 3 4 5 6 7 8` on one line, or three rows with `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            if i > 0 {
                if f.alternate() && i % GRID_WIDTH == 0 {
                    f.write_str("\n")?;
                } else {
                    f.write_str(" ")?;
                }
            }
            if cell == BLANK {
                f.write_str("b")?;
            } else {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse whitespace or comma separated cells. `b`, `_` and `0` mark the blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(parse_token)
            .collect::<Result<Vec<u8>, BoardError>>()?;
        Board::new(&cells)
    }
}

fn parse_token(token: &str) -> Result<u8, BoardError> {
    match token {
        "b" | "B" | "_" => Ok(BLANK),
        _ => token
            .parse::<u8>()
            .map_err(|_| BoardError::InvalidToken(token.to_string())),
    }
}

/// JSON cell: a tile number, or a marker string for the blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Tile(u8),
    Marker(String),
}

impl TryFrom<Vec<RawCell>> for Board {
    type Error = BoardError;

    fn try_from(raw: Vec<RawCell>) -> Result<Self, Self::Error> {
        let cells = raw
            .into_iter()
            .map(|cell| match cell {
                RawCell::Tile(tile) => Ok(tile),
                RawCell::Marker(marker) => parse_token(&marker),
            })
            .collect::<Result<Vec<u8>, BoardError>>()?;
        Board::new(&cells)
    }
}

impl From<Board> for Vec<RawCell> {
    fn from(board: Board) -> Self {
        board
            .cells
            .iter()
            .map(|&c| {
                if c == BLANK {
                    RawCell::Marker("b".to_string())
                } else {
                    RawCell::Tile(c)
                }
            })
            .collect()
    }
}

/// Target configuration for a search run.
///
/// Precomputes where every tile belongs so heuristics do not have to scan
/// the goal board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Board", into = "Board")]
pub struct Goal {
    board: Board,
    /// `positions[tile]` is the goal index of `tile`; index 0 holds the blank.
    positions: [usize; CELL_COUNT],
}

impl Goal {
    pub fn new(board: Board) -> Self {
        let mut positions = [0; CELL_COUNT];
        for (index, &cell) in board.cells().iter().enumerate() {
            positions[cell as usize] = index;
        }
        Self { board, positions }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Goal position of `tile` (use [`BLANK`] for the blank).
    pub fn position_of(&self, tile: u8) -> usize {
        self.positions[tile as usize]
    }

    pub fn is_goal(&self, board: &Board) -> bool {
        self.board == *board
    }
}

impl Default for Goal {
    fn default() -> Self {
        Goal::new(Board::canonical_goal())
    }
}

impl From<Board> for Goal {
    fn from(board: Board) -> Self {
        Goal::new(board)
    }
}

impl From<Goal> for Board {
    fn from(goal: Goal) -> Self {
        goal.board
    }
}
