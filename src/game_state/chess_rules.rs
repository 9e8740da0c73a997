//! Canonical chess-rule constants.
//!
//! Holds the standard starting position plus the fixed castling geometry
//! shared by the SAN applier and the coordinate validator.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move draw condition is reached.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

/// Squares touched by one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub must_be_empty: &'static [Square],
    /// Squares the king passes through, destination included; none may be attacked.
    pub king_transit: &'static [Square],
}

const LIGHT_KINGSIDE: CastlingGeometry = CastlingGeometry {
    right: CASTLE_LIGHT_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    must_be_empty: &[5, 6],
    king_transit: &[5, 6],
};

const LIGHT_QUEENSIDE: CastlingGeometry = CastlingGeometry {
    right: CASTLE_LIGHT_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    must_be_empty: &[1, 2, 3],
    king_transit: &[3, 2],
};

const DARK_KINGSIDE: CastlingGeometry = CastlingGeometry {
    right: CASTLE_DARK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    must_be_empty: &[61, 62],
    king_transit: &[61, 62],
};

const DARK_QUEENSIDE: CastlingGeometry = CastlingGeometry {
    right: CASTLE_DARK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    must_be_empty: &[57, 58, 59],
    king_transit: &[59, 58],
};

pub const fn castling_geometry(color: Color, side: CastlingSide) -> CastlingGeometry {
    match (color, side) {
        (Color::Light, CastlingSide::KingSide) => LIGHT_KINGSIDE,
        (Color::Light, CastlingSide::QueenSide) => LIGHT_QUEENSIDE,
        (Color::Dark, CastlingSide::KingSide) => DARK_KINGSIDE,
        (Color::Dark, CastlingSide::QueenSide) => DARK_QUEENSIDE,
    }
}

/// Castling geometry whose king move is exactly `from -> to`, if any.
pub fn castling_geometry_for_king_move(
    color: Color,
    from: Square,
    to: Square,
) -> Option<CastlingGeometry> {
    [CastlingSide::KingSide, CastlingSide::QueenSide]
        .into_iter()
        .map(|side| castling_geometry(color, side))
        .find(|geometry| geometry.king_from == from && geometry.king_to == to)
}

/// Castling right tied to a rook's original corner square.
pub const fn castling_right_for_rook_home(square: Square) -> Option<CastlingRights> {
    match square {
        0 => Some(CASTLE_LIGHT_QUEENSIDE),
        7 => Some(CASTLE_LIGHT_KINGSIDE),
        56 => Some(CASTLE_DARK_QUEENSIDE),
        63 => Some(CASTLE_DARK_KINGSIDE),
        _ => None,
    }
}
