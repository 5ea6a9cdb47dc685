//! Piece kinds, sides and material values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side to move / piece owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven Xiangqi piece kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Advisor,
    Elephant,
    Horse,
    Rook,
    Cannon,
    Pawn,
}

impl PieceKind {
    /// All piece kinds in declaration order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::King,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Rook,
        PieceKind::Cannon,
        PieceKind::Pawn,
    ];

    /// Material value used by the evaluation
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::King => 10000,
            PieceKind::Advisor => 20,
            PieceKind::Elephant => 20,
            PieceKind::Horse => 40,
            PieceKind::Rook => 90,
            PieceKind::Cannon => 45,
            PieceKind::Pawn => 10,
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    #[serde(rename = "color")]
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Red.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::Red);
    }

    #[test]
    fn test_values() {
        assert!(PieceKind::Rook.value() > PieceKind::Cannon.value());
        assert!(PieceKind::Cannon.value() > PieceKind::Horse.value());
        assert_eq!(PieceKind::King.value(), 10000);
    }

    #[test]
    fn test_piece_wire_format() {
        let piece = Piece::new(PieceKind::Cannon, Side::Black);
        let json = serde_json::to_value(piece).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "cannon", "color": "black" }));

        let back: Piece = serde_json::from_value(json).unwrap();
        assert_eq!(back, piece);
    }
}
