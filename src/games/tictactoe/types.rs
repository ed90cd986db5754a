//! Core board types shared by the session state machine and the wire format.

use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Position;

/// A square on the tic-tac-toe board.
///
/// On the wire an empty square is `null`, the local player's mark is `"X"`
/// and the model's mark is `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Marked by the local player.
    PlayerMark,
    /// Marked by the remote model.
    OpponentMark,
}

impl Cell {
    /// Returns the display symbol for this cell.
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => " ",
            Cell::PlayerMark => "X",
            Cell::OpponentMark => "O",
        }
    }

    /// Decodes a wire marker.
    ///
    /// The service uses `"b"` internally for blank squares and lowercase
    /// marks, so those spellings are accepted alongside the canonical ones.
    pub fn from_marker(marker: Option<&str>) -> Option<Self> {
        let Some(marker) = marker else {
            return Some(Cell::Empty);
        };
        match marker.trim().to_ascii_lowercase().as_str() {
            "" | "b" => Some(Cell::Empty),
            "x" => Some(Cell::PlayerMark),
            "o" => Some(Cell::OpponentMark),
            _ => None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::PlayerMark => serializer.serialize_str("X"),
            Cell::OpponentMark => serializer.serialize_str("O"),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let marker = Option::<String>::deserialize(deserializer)?;
        Cell::from_marker(marker.as_deref()).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown board marker {:?}",
                marker.unwrap_or_default()
            ))
        })
    }
}

/// Returned when a board payload does not hold exactly nine cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("board must have exactly 9 cells, got {}", len)]
pub struct BoardLengthError {
    /// Number of cells actually received.
    pub len: usize,
}

/// 3x3 board in row-major order (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from nine cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Returns the cell at a position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Returns a copy of this board with `pos` set to `cell`.
    pub fn with(mut self, pos: Position, cell: Cell) -> Self {
        self.cells[pos.to_index()] = cell;
        self
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// True when no square has been played.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Positions that are still open.
    pub fn open_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Formats the board as a human-readable string, numbering open squares.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                match self.cells[idx] {
                    Cell::Empty => result.push_str(&(idx + 1).to_string()),
                    cell => result.push_str(cell.symbol()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = BoardLengthError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        let len = cells.len();
        let cells: [Cell; 9] = cells.try_into().map_err(|_| BoardLengthError { len })?;
        Ok(Self::from_cells(cells))
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Self {
        board.cells().to_vec()
    }
}
