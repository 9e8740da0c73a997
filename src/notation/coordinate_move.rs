//! Coordinate delta produced by the move applier.
//!
//! A renderer animates a ply from this payload alone: the ordered `(from, to)`
//! relocations (two for castling, one for a normal move, none for a null
//! move), a piece to `remove` and a piece to `add`. It is also the record the
//! replay history reverses when stepping backward.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateMove {
    pub moves: Vec<(Square, Square)>,
    pub remove: Option<(Piece, Square)>,
    pub add: Option<(Piece, Square)>,
}

impl CoordinateMove {
    #[inline]
    pub fn is_null(&self) -> bool {
        self.moves.is_empty()
    }

    /// Replay this delta onto `position`: relocations first, then the
    /// removal, then the addition (which overwrites a promoted pawn).
    pub fn apply_to(&self, position: &mut Position) {
        if let Some((_, square)) = self.remove {
            position.take(square);
        }
        for &(from, to) in &self.moves {
            position.relocate(from, to);
        }
        if let Some((piece, square)) = self.add {
            position.put(square, piece);
        }
    }

    /// Undo this delta on `position`, restoring the pre-move placement.
    pub fn revert_on(&self, position: &mut Position) {
        if let Some((piece, square)) = self.add {
            position.put(square, Piece::new(piece.color, PieceKind::Pawn));
        }
        for &(from, to) in self.moves.iter().rev() {
            position.relocate(to, from);
        }
        if let Some((piece, square)) = self.remove {
            position.put(square, piece);
        }
    }
}

#[derive(Serialize)]
struct CoordinateMovePayload {
    moves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remove: Option<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    add: Option<[String; 2]>,
}

impl From<&CoordinateMove> for CoordinateMovePayload {
    fn from(mv: &CoordinateMove) -> Self {
        let piece_and_square = |(piece, square): (Piece, Square)| {
            [piece.code().to_string(), square_to_algebraic(square)]
        };

        Self {
            moves: mv
                .moves
                .iter()
                .map(|&(from, to)| {
                    format!("{}-{}", square_to_algebraic(from), square_to_algebraic(to))
                })
                .collect(),
            remove: mv.remove.map(piece_and_square),
            add: mv.add.map(piece_and_square),
        }
    }
}

impl Serialize for CoordinateMove {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CoordinateMovePayload::from(self).serialize(serializer)
    }
}

impl fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
