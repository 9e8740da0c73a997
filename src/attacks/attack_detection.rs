//! Attack and reachability primitives.
//!
//! Both the SAN replay path (`notation::source_resolver`) and the coordinate
//! validator (`validation::legality`) answer "can this piece get there" and
//! "is this square attacked" through the functions in this module only.
//! Nothing here consults own-king safety beyond `move_exposes_king`, so the
//! attack queries never recurse into full legality.

use crate::attacks::leaper_tables::{king_attacks, knight_attacks, pawn_attacks};
use crate::attacks::slider_rays::{bishop_attacks, queen_attacks, rook_attacks, squares_between};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Capture targets of `piece` standing on `from` given board `occupancy`.
/// For pawns this is the diagonal capture set, not the push set.
#[inline]
pub fn piece_attacks(piece: Piece, from: Square, occupancy: u64) -> u64 {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupancy),
        PieceKind::Rook => rook_attacks(from, occupancy),
        PieceKind::Queen => queen_attacks(from, occupancy),
        PieceKind::King => king_attacks(from),
    }
}

/// True if any `attacker_color` piece has a pseudo-legal capture onto `square`.
pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let occupancy = position.occupancy();

    position
        .pieces()
        .filter(|(_, piece)| piece.color == attacker_color)
        .any(|(from, piece)| piece_attacks(piece, from, occupancy) & (1u64 << square) != 0)
}

/// Every `attacker_color` piece attacking `square`.
pub fn attackers_to_square(
    position: &Position,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let occupancy = position.occupancy();

    position
        .pieces()
        .filter(|(from, piece)| {
            piece.color == attacker_color
                && piece_attacks(*piece, *from, occupancy) & (1u64 << square) != 0
        })
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}

/// A side without a king on the board is never in check.
#[inline]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

/// Single or double forward pawn push onto empty squares. The double step is
/// only available from the starting rank with the skipped square empty.
pub fn pawn_push_reaches(position: &Position, color: Color, from: Square, to: Square) -> bool {
    if file_of(from) != file_of(to) || !position.is_empty_square(to) {
        return false;
    }

    let rank_delta = rank_of(to) as i8 - rank_of(from) as i8;
    let forward = color.forward();

    if rank_delta == forward {
        return true;
    }

    rank_delta == 2 * forward
        && rank_of(from) == color.pawn_start_rank()
        && squares_between(from, to) & position.occupancy() == 0
}

/// One-square diagonal forward step, the geometric shape of a pawn capture.
#[inline]
pub fn pawn_capture_reaches(color: Color, from: Square, to: Square) -> bool {
    pawn_attacks(color, from) & (1u64 << to) != 0
}

/// Square of the pawn removed by an en-passant capture `from -> to`: the
/// destination's file on the capturing pawn's own rank.
#[inline]
pub fn en_passant_capture_square(from: Square, to: Square) -> Square {
    rank_of(from) * 8 + file_of(to)
}

/// Square skipped by a two-square pawn advance, recorded as the en-passant target.
#[inline]
pub fn en_passant_target_after_double_step(from: Square, to: Square) -> Option<Square> {
    (file_of(from) == file_of(to) && rank_of(from).abs_diff(rank_of(to)) == 2)
        .then(|| (from + to) / 2)
}

/// Pseudo-legal reachability of `from -> to` for `piece`, castling excluded.
///
/// The destination must not hold a piece of the mover's color. Pawn diagonal
/// steps need an enemy piece on `to` or `to == en_passant`.
pub fn pseudo_legal_reach(
    position: &Position,
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    if from == to {
        return false;
    }
    if matches!(position.piece_at(to), Some(target) if target.color == piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => {
            if pawn_push_reaches(position, piece.color, from, to) {
                return true;
            }
            pawn_capture_reaches(piece.color, from, to)
                && (position.piece_at(to).is_some() || en_passant == Some(to))
        }
        _ => piece_attacks(piece, from, position.occupancy()) & (1u64 << to) != 0,
    }
}

/// Play `from -> to` on a copy of `position` (removing `captured_elsewhere`,
/// the en-passant victim, if given) and report whether the mover's king is
/// then attacked. The input position is never modified.
pub fn move_exposes_king(
    position: &Position,
    from: Square,
    to: Square,
    captured_elsewhere: Option<Square>,
) -> bool {
    let Some(mover) = position.piece_at(from) else {
        return false;
    };

    let mut simulated = *position;
    if let Some(victim) = captured_elsewhere {
        simulated.take(victim);
    }
    simulated.relocate(from, to);

    is_in_check(&simulated, mover.color)
}
