//! Coordinate-first move legality.
//!
//! Answers "may `piece` go from `from` to `to`" for drag-and-drop style input.
//! Illegal or malformed input is an ordinary `false`, never an error. The
//! reachability and attack questions are delegated to
//! `attacks::attack_detection`, the same primitives the SAN resolver uses.

use crate::attacks::attack_detection::{
    en_passant_capture_square, is_square_attacked, move_exposes_king,
    pawn_capture_reaches, piece_attacks, pseudo_legal_reach,
};
use crate::game_state::chess_rules::{castling_geometry_for_king_move, CastlingGeometry};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::AuxState;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::fen_parser::fen_to_position;

/// Legality of `piece` moving `from -> to` on `position`.
///
/// `skip_check_validation` drops the own-king safety test; castling still has
/// to satisfy its own attack conditions. The position is never modified.
pub fn is_legal_move(
    position: &Position,
    aux: AuxState,
    from: Square,
    to: Square,
    piece: Piece,
    skip_check_validation: bool,
) -> bool {
    if from >= 64 || to >= 64 || from == to {
        return false;
    }
    if position.piece_at(from) != Some(piece) {
        return false;
    }

    if piece.kind == PieceKind::King {
        if let Some(geometry) = castling_geometry_for_king_move(piece.color, from, to) {
            return castling_is_legal(position, aux, piece.color, &geometry);
        }
    }

    if !pseudo_legal_reach(position, piece, from, to, aux.en_passant_square) {
        return false;
    }

    let captured_elsewhere = if piece.kind == PieceKind::Pawn
        && file_of(from) != file_of(to)
        && position.is_empty_square(to)
    {
        let victim = en_passant_capture_square(from, to);
        if position.piece_at(victim) != Some(Piece::new(piece.color.opposite(), PieceKind::Pawn)) {
            return false;
        }
        Some(victim)
    } else {
        None
    };

    skip_check_validation || !move_exposes_king(position, from, to, captured_elsewhere)
}

fn castling_is_legal(
    position: &Position,
    aux: AuxState,
    color: Color,
    geometry: &CastlingGeometry,
) -> bool {
    let enemy = color.opposite();

    aux.castling_rights & geometry.right != 0
        && position.piece_at(geometry.rook_from) == Some(Piece::new(color, PieceKind::Rook))
        && geometry
            .must_be_empty
            .iter()
            .all(|&sq| position.is_empty_square(sq))
        && !is_square_attacked(position, geometry.king_from, enemy)
        && !geometry
            .king_transit
            .iter()
            .any(|&sq| is_square_attacked(position, sq, enemy))
}

/// String-level entry point for interactive callers.
///
/// `fen` may be a full FEN or just its placement field; side to move is taken
/// from `piece`. Any unparsable argument makes the move illegal.
pub fn is_legal_move_fen(
    fen: &str,
    from: &str,
    to: &str,
    piece: &str,
    castling: &str,
    en_passant: &str,
) -> bool {
    let Some(placement) = fen.split_whitespace().next() else {
        return false;
    };
    let mut piece_chars = piece.chars();
    let (Some(code), None) = (piece_chars.next(), piece_chars.next()) else {
        return false;
    };

    let parsed = (
        fen_to_position(placement),
        AuxState::parse(castling, en_passant),
        algebraic_to_square(from),
        algebraic_to_square(to),
        Piece::from_code(code),
    );
    match parsed {
        (Ok(position), Ok(aux), Ok(from), Ok(to), Some(piece)) => {
            is_legal_move(&position, aux, from, to, piece, false)
        }
        _ => false,
    }
}

/// Squares worth asking the validator about for the piece on `from`.
fn candidate_destinations(position: &Position, piece: Piece, from: Square) -> u64 {
    let own = position.occupancy_of(piece.color);
    let mut targets = piece_attacks(piece, from, position.occupancy());

    match piece.kind {
        PieceKind::Pawn => {
            for steps in [1i8, 2] {
                let rank = rank_of(from) as i8 + steps * piece.color.forward();
                if let Some(to) = square_at(file_of(from) as i8, rank) {
                    targets |= 1u64 << to;
                }
            }
        }
        PieceKind::King => {
            for file in [2i8, 6] {
                if let Some(to) = square_at(file, rank_of(from) as i8) {
                    targets |= 1u64 << to;
                }
            }
        }
        _ => {}
    }

    targets & !own
}

/// Every legal destination of the piece standing on `from`. Empty for an
/// empty or off-board `from`.
pub fn legal_destinations(position: &Position, aux: AuxState, from: Square) -> Vec<Square> {
    if from >= 64 {
        return Vec::new();
    }
    let Some(piece) = position.piece_at(from) else {
        return Vec::new();
    };

    let mut targets = candidate_destinations(position, piece, from);
    let mut out = Vec::new();
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        if is_legal_move(position, aux, from, to, piece, false) {
            out.push(to);
        }
        targets &= targets - 1;
    }
    out
}

/// All legal `(from, to)` pairs for `color`, ordered by origin then destination.
pub fn legal_moves(position: &Position, aux: AuxState, color: Color) -> Vec<(Square, Square)> {
    position
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .flat_map(|(from, _)| {
            legal_destinations(position, aux, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(position: &Position, aux: AuxState, color: Color) -> bool {
    position
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .any(|(from, piece)| {
            let mut targets = candidate_destinations(position, piece, from);
            while targets != 0 {
                let to = targets.trailing_zeros() as Square;
                if is_legal_move(position, aux, from, to, piece, false) {
                    return true;
                }
                targets &= targets - 1;
            }
            false
        })
}

/// True when a pawn of `color` on `from` moving to `to` would have to promote.
#[inline]
pub fn is_promotion_move(color: Color, from: Square, to: Square) -> bool {
    rank_of(to) == color.promotion_rank()
        && (file_of(from) == file_of(to) || pawn_capture_reaches(color, from, to))
}
