//! Checkmate, stalemate and draw detection.

use crate::attacks::attack_detection::is_in_check;
use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{AuxState, GameState};
use crate::game_state::position::Position;
use crate::validation::legality::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    /// 100 plies without a pawn move or capture. Reported, never enforced.
    FiftyMoveRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

pub fn is_checkmate(fen: &str, color: Color) -> ChessResult<bool> {
    let game_state = GameState::from_fen(fen)?;
    Ok(is_checkmate_position(&game_state.position, game_state.aux(), color))
}

pub fn is_stalemate(fen: &str, color: Color) -> ChessResult<bool> {
    let game_state = GameState::from_fen(fen)?;
    Ok(is_stalemate_position(&game_state.position, game_state.aux(), color))
}

pub fn is_insufficient_material(fen: &str) -> ChessResult<bool> {
    let game_state = GameState::from_fen(fen)?;
    Ok(has_insufficient_material(&game_state.position))
}

pub fn is_fifty_move_draw(fen: &str) -> ChessResult<bool> {
    Ok(GameState::from_fen(fen)?.is_fifty_move_draw())
}

pub fn is_checkmate_position(position: &Position, aux: AuxState, color: Color) -> bool {
    is_in_check(position, color) && !has_any_legal_move(position, aux, color)
}

pub fn is_stalemate_position(position: &Position, aux: AuxState, color: Color) -> bool {
    !is_in_check(position, color) && !has_any_legal_move(position, aux, color)
}

/// Neither side can deliver mate: kings alone, a single minor piece, or
/// only bishops that all stand on one square color.
pub fn has_insufficient_material(position: &Position) -> bool {
    let mut minors = 0usize;
    let mut knights = 0usize;
    let mut bishops_on_light = 0usize;
    let mut bishops_on_dark = 0usize;

    for (square, piece) in position.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => {
                minors += 1;
                knights += 1;
            }
            PieceKind::Bishop => {
                minors += 1;
                if is_light_square(square) {
                    bishops_on_light += 1;
                } else {
                    bishops_on_dark += 1;
                }
            }
        }
    }

    minors <= 1 || (knights == 0 && (bishops_on_light == 0 || bishops_on_dark == 0))
}

/// Status for the side to move in `game_state`.
///
/// Mate and stalemate take precedence over the draw conditions.
pub fn game_status(game_state: &GameState) -> GameStatus {
    let side = game_state.side_to_move;
    let position = &game_state.position;

    if !has_any_legal_move(position, game_state.aux(), side) {
        return if is_in_check(position, side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if has_insufficient_material(position) {
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    } else if game_state.is_fifty_move_draw() {
        GameStatus::Draw(DrawReason::FiftyMoveRule)
    } else {
        GameStatus::Ongoing
    }
}
