//! Origin-square resolution for parsed SAN moves.
//!
//! Candidates are the mover's pieces of the parsed kind. They are narrowed by
//! movement shape and disambiguation hints, then (only while more than one
//! remains) by own-king safety. Exactly one must survive.

use tracing::trace;

use crate::attacks::attack_detection::{
    en_passant_capture_square, move_exposes_king, pawn_capture_reaches, pawn_push_reaches,
    pseudo_legal_reach,
};
use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::notation::san_parser::StandardMove;
use crate::utils::algebraic::square_to_algebraic;

pub fn resolve_source(game_state: &GameState, mv: &StandardMove) -> ChessResult<Square> {
    let mover = Piece::new(game_state.side_to_move, mv.piece);
    let position = &game_state.position;
    let to = mv.destination;

    let mut candidates: Vec<Square> = position
        .squares_with(mover)
        .filter(|&from| matches_hints(mv, from))
        .filter(|&from| match mv.piece {
            PieceKind::Pawn if mv.is_capture => pawn_capture_candidate(game_state, from, to),
            PieceKind::Pawn => pawn_push_candidate(game_state, from, to),
            _ => pseudo_legal_reach(position, mover, from, to, None),
        })
        .collect();

    if candidates.len() > 1 {
        candidates.retain(|&from| {
            let victim = en_passant_victim(game_state, mv, from);
            !move_exposes_king(position, from, to, victim)
        });
    }

    trace!(san = %mv, candidates = ?candidates, "resolved source candidates");

    match candidates.as_slice() {
        [from] => Ok(*from),
        [] => Err(ChessErrors::NoLegalSource(mv.to_string())),
        _ => Err(ChessErrors::AmbiguousMove {
            san: mv.to_string(),
            candidates: candidates.iter().map(|&sq| square_to_algebraic(sq)).collect(),
        }),
    }
}

fn matches_hints(mv: &StandardMove, from: Square) -> bool {
    mv.file_hint.map_or(true, |file| file_of(from) == file)
        && mv.rank_hint.map_or(true, |rank| rank_of(from) == rank)
}

/// Non-capturing pawn moves stay on the destination file.
fn pawn_push_candidate(game_state: &GameState, from: Square, to: Square) -> bool {
    pawn_push_reaches(&game_state.position, game_state.side_to_move, from, to)
}

/// Capturing pawn moves step one square diagonally forward onto an enemy
/// piece or onto the en-passant target.
fn pawn_capture_candidate(game_state: &GameState, from: Square, to: Square) -> bool {
    let side = game_state.side_to_move;
    if !pawn_capture_reaches(side, from, to) {
        return false;
    }

    match game_state.position.piece_at(to) {
        Some(target) => target.color != side,
        None => game_state.en_passant_square == Some(to),
    }
}

/// En-passant victim square when `from -> destination` is an en-passant capture.
pub fn en_passant_victim(game_state: &GameState, mv: &StandardMove, from: Square) -> Option<Square> {
    let to = mv.destination;
    (mv.piece == PieceKind::Pawn
        && file_of(from) != file_of(to)
        && game_state.position.is_empty_square(to))
    .then(|| en_passant_capture_square(from, to))
}
