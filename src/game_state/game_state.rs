//! Mutable per-game board state.
//!
//! `GameState` bundles the `Position` with side to move, castling rights,
//! en-passant target and both clocks. One instance belongs to exactly one game
//! replay and is threaded explicitly through every call; nothing in the crate
//! holds board state globally.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_castling_rights, parse_en_passant_square, parse_fen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub position: Position,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Castling rights and en-passant target, as consumed by the validator.
    #[inline]
    pub fn aux(&self) -> AuxState {
        AuxState {
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    /// True once the halfmove clock reaches 100 plies. Detection only.
    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT
    }
}

/// Auxiliary state the coordinate validator needs beyond the placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuxState {
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
}

impl AuxState {
    /// Decode the FEN-style castling (`KQkq`/`-`) and en-passant (`e3`/`-`)
    /// fields supplied alongside an interactive move.
    pub fn parse(castling: &str, en_passant: &str) -> ChessResult<Self> {
        Ok(Self {
            castling_rights: parse_castling_rights(castling)?,
            en_passant_square: parse_en_passant_square(en_passant)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AuxState, GameState};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.castling_rights, CASTLE_ALL);
        assert_eq!(game.position.pieces().count(), 32);
    }

    #[test]
    fn fifty_move_condition_starts_at_one_hundred_plies() {
        let mut game = GameState::from_fen("8/8/8/4k3/8/8/8/4K2R w - - 99 80")
            .expect("FEN should parse");
        assert!(!game.is_fifty_move_draw());
        game.halfmove_clock = 100;
        assert!(game.is_fifty_move_draw());
    }

    #[test]
    fn aux_state_parses_interactive_fields() {
        let aux = AuxState::parse("Kq", "d6").expect("fields should parse");
        assert_eq!(aux.castling_rights, CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(aux.en_passant_square, Some(43));

        assert!(AuxState::parse("KX", "-").is_err());
        assert!(AuxState::parse("-", "z9").is_err());
    }
}
