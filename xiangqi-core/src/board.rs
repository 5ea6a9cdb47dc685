//! Board geometry, squares and board values
//!
//! Row 0 is black's back rank, row 9 is red's. Boards are plain `Copy`
//! arrays: applying a move yields a fresh board and leaves the old one intact.

use crate::error::CoreError;
use crate::pieces::{Piece, PieceKind, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows (ranks)
pub const ROWS: usize = 10;
/// Number of columns (files)
pub const COLS: usize = 9;

/// Palace columns, shared by both sides
pub const PALACE_COLS: [u8; 3] = [3, 4, 5];
pub const RED_PALACE_ROWS: [u8; 3] = [7, 8, 9];
pub const BLACK_PALACE_ROWS: [u8; 3] = [0, 1, 2];

/// Lowest row a red elephant may stand on
pub const RED_RIVER_ROW: u8 = 5;
/// Highest row a black elephant may stand on
pub const BLACK_RIVER_ROW: u8 = 4;

/// Back-rank layout from column 0 to 8
const BACK_RANK: [PieceKind; COLS] = [
    PieceKind::Rook,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::King,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Rook,
];

// ============================================================================
// SQUARE
// ============================================================================

/// A (row, column) square, always on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "[u8; 2]", try_from = "[i32; 2]")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Checked constructor
    pub fn new(row: i32, col: i32) -> Result<Self, CoreError> {
        if (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(CoreError::OutOfBounds { row, col })
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Step by (dr, dc); `None` when the result leaves the grid
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i32 + dr as i32;
        let col = self.col as i32 + dc as i32;
        Square::new(row, col).ok()
    }

    /// Reflect across the river (row r -> 9 - r)
    pub fn mirrored(self) -> Square {
        Square {
            row: (ROWS as u8 - 1) - self.row,
            col: self.col,
        }
    }

    /// Whether this square lies inside `side`'s palace
    pub fn in_palace(self, side: Side) -> bool {
        let rows = match side {
            Side::Red => &RED_PALACE_ROWS,
            Side::Black => &BLACK_PALACE_ROWS,
        };
        rows.contains(&self.row) && PALACE_COLS.contains(&self.col)
    }

    /// Whether this square is on `side`'s half of the river
    pub fn on_home_side(self, side: Side) -> bool {
        match side {
            Side::Red => self.row >= RED_RIVER_ROW,
            Side::Black => self.row <= BLACK_RIVER_ROW,
        }
    }

    /// Whether a `side` pawn here has crossed the river
    pub fn across_river(self, side: Side) -> bool {
        !self.on_home_side(side)
    }
}

impl From<Square> for [u8; 2] {
    fn from(sq: Square) -> Self {
        [sq.row, sq.col]
    }
}

impl TryFrom<[i32; 2]> for Square {
    type Error = CoreError;

    fn try_from([row, col]: [i32; 2]) -> Result<Self, Self::Error> {
        Square::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// MOVE
// ============================================================================

/// An ordered (from, to) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Transport form of a board: 10 rows of 9 optional pieces
pub type BoardSnapshot = Vec<Vec<Option<Piece>>>;

/// 10x9 grid of optional pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Board with no pieces
    pub const fn empty() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Standard starting layout
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(kind, Side::Black));
            board.cells[9][col] = Some(Piece::new(kind, Side::Red));
        }
        for col in [1, 7] {
            board.cells[2][col] = Some(Piece::new(PieceKind::Cannon, Side::Black));
            board.cells[7][col] = Some(Piece::new(PieceKind::Cannon, Side::Red));
        }
        for col in [0, 2, 4, 6, 8] {
            board.cells[3][col] = Some(Piece::new(PieceKind::Pawn, Side::Black));
            board.cells[6][col] = Some(Piece::new(PieceKind::Pawn, Side::Red));
        }

        board
    }

    /// Builder-style placement, used to set up positions
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.cells[sq.row as usize][sq.col as usize] = Some(piece);
        self
    }

    /// Get piece at square
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterate occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| {
                    (
                        Square {
                            row: row as u8,
                            col: col as u8,
                        },
                        piece,
                    )
                })
            })
        })
    }

    /// Square of `side`'s king, if present
    pub fn king_pos(&self, side: Side) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is_king() && p.side == side)
            .map(|(sq, _)| sq)
    }

    /// Move the piece at `from` to `to`, returning the new board.
    /// Whatever stood on `to` is removed.
    pub fn apply(&self, mv: Move) -> Board {
        let mut next = *self;
        let piece = next.cells[mv.from.row as usize][mv.from.col as usize].take();
        next.cells[mv.to.row as usize][mv.to.col as usize] = piece;
        next
    }

    /// Nested per-square form for transport and storage
    pub fn serialize(&self) -> BoardSnapshot {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Rebuild a board from its snapshot
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, CoreError> {
        let widest = snapshot.iter().map(Vec::len).max().unwrap_or(0);
        if snapshot.len() != ROWS || snapshot.iter().any(|row| row.len() != COLS) {
            return Err(CoreError::BadSnapshot {
                rows: snapshot.len(),
                cols: widest,
            });
        }

        let mut board = Self::empty();
        for (row, cells) in snapshot.iter().enumerate() {
            board.cells[row].copy_from_slice(cells);
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    None => '.',
                    Some(p) => {
                        let c = match p.kind {
                            PieceKind::King => 'k',
                            PieceKind::Advisor => 'a',
                            PieceKind::Elephant => 'e',
                            PieceKind::Horse => 'h',
                            PieceKind::Rook => 'r',
                            PieceKind::Cannon => 'c',
                            PieceKind::Pawn => 'p',
                        };
                        if p.side == Side::Red {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    }
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
