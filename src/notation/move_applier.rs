//! SAN move application.
//!
//! Translates a parsed move into a `CoordinateMove` and advances the
//! `GameState` by one ply. Each move is planned against an immutable view of
//! the state first and committed only once planning succeeded, so a failing
//! move never leaves the state half-updated.
//!
//! The applier trusts the source resolver: it checks that the board agrees
//! with the descriptor (right piece on the origin, castling right and rook in
//! place, promotion where required) but does not re-run king-safety checks.

use tracing::trace;

use crate::attacks::attack_detection::{
    en_passant_capture_square, en_passant_target_after_double_step,
};
use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{
    castling_geometry, castling_right_for_rook_home, CastlingSide,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::notation::coordinate_move::CoordinateMove;
use crate::notation::san_parser::{parse_san, MoveDescriptor, StandardMove};
use crate::notation::source_resolver::resolve_source;
use crate::utils::algebraic::square_to_algebraic;

/// Parse, resolve and apply one SAN move.
pub fn apply_san(game_state: &mut GameState, san: &str) -> ChessResult<CoordinateMove> {
    let descriptor = parse_san(san)?;
    apply_descriptor(game_state, &descriptor)
}

pub fn apply_descriptor(
    game_state: &mut GameState,
    descriptor: &MoveDescriptor,
) -> ChessResult<CoordinateMove> {
    let plan = match descriptor {
        MoveDescriptor::Standard(mv) => {
            let from = resolve_source(game_state, mv)?;
            plan_standard(game_state, mv, from)?
        }
        MoveDescriptor::Castle { side, .. } => plan_castle(game_state, *side)?,
        MoveDescriptor::Null => plan_null(game_state),
    };

    trace!(san = %descriptor, delta = %plan.coordinate_move, "applying move");
    Ok(commit(game_state, plan))
}

/// Apply a standard move whose origin square is already known.
///
/// Fails with `InvalidMove` when `from` does not hold the side to move's
/// piece of the descriptor's kind.
pub fn apply_resolved(
    game_state: &mut GameState,
    mv: &StandardMove,
    from: Square,
) -> ChessResult<CoordinateMove> {
    let plan = plan_standard(game_state, mv, from)?;
    Ok(commit(game_state, plan))
}

#[derive(Debug)]
struct PlannedMove {
    coordinate_move: CoordinateMove,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
    resets_halfmove_clock: bool,
}

fn plan_standard(game_state: &GameState, mv: &StandardMove, from: Square) -> ChessResult<PlannedMove> {
    let side = game_state.side_to_move;
    let to = mv.destination;
    let position = &game_state.position;

    let mover = position
        .piece_at(from)
        .filter(|piece| piece.color == side && piece.kind == mv.piece)
        .ok_or_else(|| {
            ChessErrors::InvalidMove(format!(
                "{mv}: no {:?} {:?} on {}",
                side,
                mv.piece,
                square_to_algebraic(from)
            ))
        })?;

    let remove = match position.piece_at(to) {
        Some(target) if target.color == side => {
            return Err(ChessErrors::InvalidMove(format!(
                "{mv}: destination {} holds an own piece",
                square_to_algebraic(to)
            )));
        }
        Some(target) => Some((target, to)),
        None if mover.kind == PieceKind::Pawn && file_of(from) != file_of(to) => {
            let victim_square = en_passant_capture_square(from, to);
            let victim = Piece::new(side.opposite(), PieceKind::Pawn);
            if position.piece_at(victim_square) != Some(victim) {
                return Err(ChessErrors::InvalidMove(format!(
                    "{mv}: no pawn to capture en passant on {}",
                    square_to_algebraic(victim_square)
                )));
            }
            Some((victim, victim_square))
        }
        None if mv.is_capture => {
            return Err(ChessErrors::InvalidMove(format!(
                "{mv}: capture onto empty square {}",
                square_to_algebraic(to)
            )));
        }
        None => None,
    };

    let reaches_last_rank = mover.kind == PieceKind::Pawn && rank_of(to) == side.promotion_rank();
    let add = match (reaches_last_rank, mv.promotion) {
        (true, Some(kind)) => Some((Piece::new(side, kind), to)),
        (false, None) => None,
        (true, None) => {
            return Err(ChessErrors::InvalidMove(format!("{mv}: pawn must promote")));
        }
        (false, Some(_)) => {
            return Err(ChessErrors::InvalidMove(format!(
                "{mv}: only a pawn reaching the last rank promotes"
            )));
        }
    };

    let mut castling_rights = game_state.castling_rights;
    if mover.kind == PieceKind::King {
        castling_rights &= !castling_rights_of(side);
    }
    if mover.kind == PieceKind::Rook {
        if let Some(flag) = castling_right_for_rook_home(from) {
            castling_rights &= !(flag & castling_rights_of(side));
        }
    }
    if let Some(flag) = castling_right_for_rook_home(to) {
        castling_rights &= !flag;
    }

    let en_passant_square = if mover.kind == PieceKind::Pawn {
        en_passant_target_after_double_step(from, to)
    } else {
        None
    };

    Ok(PlannedMove {
        resets_halfmove_clock: mover.kind == PieceKind::Pawn || remove.is_some(),
        coordinate_move: CoordinateMove {
            moves: vec![(from, to)],
            remove,
            add,
        },
        castling_rights,
        en_passant_square,
    })
}

fn plan_castle(game_state: &GameState, side: CastlingSide) -> ChessResult<PlannedMove> {
    let color = game_state.side_to_move;
    let geometry = castling_geometry(color, side);
    let position = &game_state.position;

    if game_state.castling_rights & geometry.right == 0 {
        return Err(ChessErrors::InvalidMove(format!(
            "{side:?} castling for {color:?} without the castling right"
        )));
    }

    let king = Piece::new(color, PieceKind::King);
    let rook = Piece::new(color, PieceKind::Rook);
    if position.piece_at(geometry.king_from) != Some(king)
        || position.piece_at(geometry.rook_from) != Some(rook)
    {
        return Err(ChessErrors::InvalidMove(format!(
            "{side:?} castling for {color:?} without king on {} and rook on {}",
            square_to_algebraic(geometry.king_from),
            square_to_algebraic(geometry.rook_from)
        )));
    }

    if geometry
        .must_be_empty
        .iter()
        .any(|&sq| !position.is_empty_square(sq))
    {
        return Err(ChessErrors::InvalidMove(format!(
            "{side:?} castling for {color:?} through occupied squares"
        )));
    }

    Ok(PlannedMove {
        coordinate_move: CoordinateMove {
            moves: vec![
                (geometry.king_from, geometry.king_to),
                (geometry.rook_from, geometry.rook_to),
            ],
            remove: None,
            add: None,
        },
        castling_rights: game_state.castling_rights & !castling_rights_of(color),
        en_passant_square: None,
        resets_halfmove_clock: false,
    })
}

fn plan_null(game_state: &GameState) -> PlannedMove {
    PlannedMove {
        coordinate_move: CoordinateMove::default(),
        castling_rights: game_state.castling_rights,
        en_passant_square: None,
        resets_halfmove_clock: false,
    }
}

fn commit(game_state: &mut GameState, plan: PlannedMove) -> CoordinateMove {
    plan.coordinate_move.apply_to(&mut game_state.position);

    game_state.halfmove_clock = if plan.resets_halfmove_clock {
        0
    } else {
        game_state.halfmove_clock.saturating_add(1)
    };
    game_state.castling_rights = plan.castling_rights;
    game_state.en_passant_square = plan.en_passant_square;
    if game_state.side_to_move == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }
    game_state.side_to_move = game_state.side_to_move.opposite();

    plan.coordinate_move
}

#[cfg(test)]
mod tests {
    use super::{apply_resolved, apply_san};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::notation::coordinate_move::CoordinateMove;
    use crate::notation::san_parser::{parse_san, MoveDescriptor};
    use serde_json::{json, Value};

    fn payload(mv: &CoordinateMove) -> Value {
        serde_json::to_value(mv).expect("coordinate move should serialize")
    }

    fn play(game: &mut GameState, moves: &[&str]) -> Vec<Value> {
        moves
            .iter()
            .map(|san| payload(&apply_san(game, san).expect("move should apply")))
            .collect()
    }

    #[test]
    fn opening_pawn_pushes() {
        let mut game = GameState::new_game();
        let out = play(&mut game, &["e4", "e5"]);

        assert_eq!(out[0], json!({"moves": ["e2-e4"]}));
        assert_eq!(out[1], json!({"moves": ["e7-e5"]}));
        assert_eq!(
            game.get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn pawn_capture_removes_victim_on_destination() {
        let mut game = GameState::new_game();
        let out = play(&mut game, &["e4", "d5", "exd5"]);

        assert_eq!(out[2], json!({"moves": ["e4-d5"], "remove": ["p", "d5"]}));
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.en_passant_square, None);
    }

    #[test]
    fn en_passant_removes_pawn_beside_capturer() {
        let mut game = GameState::new_game();
        let out = play(&mut game, &["e4", "a6", "e5", "d5", "exd6"]);

        // Destination file (d) on the capturing pawn's rank (5).
        assert_eq!(out[4], json!({"moves": ["e5-d6"], "remove": ["p", "d5"]}));
        assert!(game.position.is_empty_square(35));
        assert_eq!(
            game.position.piece_at(43),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
    }

    #[test]
    fn promotion_places_promoted_piece() {
        let mut game = GameState::from_fen("8/P7/8/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let out = apply_san(&mut game, "a8=Q").expect("promotion should apply");

        assert_eq!(payload(&out), json!({"moves": ["a7-a8"], "add": ["Q", "a8"]}));
        assert!(game.position.is_empty_square(48));
        assert_eq!(
            game.position.piece_at(56),
            Some(Piece::new(Color::Light, PieceKind::Queen))
        );
    }

    #[test]
    fn promotion_is_mandatory_and_pawn_only() {
        let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        let snapshot = game.clone();

        assert!(matches!(apply_san(&mut game, "a8"), Err(ChessErrors::InvalidMove(_))));
        assert!(matches!(apply_san(&mut game, "Rh2=Q"), Err(ChessErrors::InvalidMove(_))));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn kingside_castle_moves_king_and_rook() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10")
            .expect("FEN should parse");
        let out = apply_san(&mut game, "O-O").expect("castle should apply");

        assert_eq!(payload(&out), json!({"moves": ["e1-g1", "h1-f1"]}));
        assert_eq!(game.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(game.halfmove_clock, 4);

        let out = apply_san(&mut game, "O-O-O").expect("castle should apply");
        assert_eq!(payload(&out), json!({"moves": ["e8-c8", "a8-d8"]}));
        assert_eq!(game.castling_rights, 0);
        assert_eq!(game.fullmove_number, 11);
        assert_eq!(game.get_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 5 11");
    }

    #[test]
    fn castling_needs_right_and_rook() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").expect("FEN should parse");
        assert!(matches!(apply_san(&mut game, "O-O"), Err(ChessErrors::InvalidMove(_))));

        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w Q - 0 1").expect("FEN should parse");
        assert!(matches!(apply_san(&mut game, "O-O"), Err(ChessErrors::InvalidMove(_))));
    }

    #[test]
    fn rook_moves_and_captures_clear_single_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");

        apply_san(&mut game, "Rb1").expect("rook move should apply");
        assert_eq!(
            game.castling_rights,
            CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );

        apply_san(&mut game, "Rxh1+").expect("rook capture should apply");
        assert_eq!(game.castling_rights, CASTLE_DARK_QUEENSIDE);
    }

    #[test]
    fn clocks_and_en_passant_lifetime() {
        let mut game = GameState::new_game();
        play(&mut game, &["Nf3", "Nf6"]);
        assert_eq!(game.halfmove_clock, 2);
        assert_eq!(game.fullmove_number, 2);

        play(&mut game, &["d4"]);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.en_passant_square, Some(19));

        play(&mut game, &["g6"]);
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.side_to_move, Color::Light);
    }

    #[test]
    fn null_move_passes_the_turn() {
        let mut game = GameState::new_game();
        play(&mut game, &["e4"]);
        let out = apply_san(&mut game, "--").expect("null move should apply");

        assert!(out.is_null());
        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.halfmove_clock, 1);
        assert_eq!(game.fullmove_number, 2);
    }

    #[test]
    fn failed_resolution_leaves_state_untouched() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1")
            .expect("FEN should parse");
        let snapshot = game.clone();

        assert!(matches!(apply_san(&mut game, "Re1"), Err(ChessErrors::AmbiguousMove { .. })));
        assert!(matches!(apply_san(&mut game, "Nf3"), Err(ChessErrors::NoLegalSource(_))));
        assert!(matches!(apply_san(&mut game, "Rz1"), Err(ChessErrors::InvalidNotation(_))));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn resolved_translation_rejects_wrong_origin() {
        let mut game = GameState::new_game();
        let MoveDescriptor::Standard(mv) = parse_san("Nf3").expect("SAN should parse") else {
            panic!("Nf3 is a standard move");
        };

        assert!(matches!(
            apply_resolved(&mut game, &mv, 4),
            Err(ChessErrors::InvalidMove(_))
        ));
        let out = apply_resolved(&mut game, &mv, 6).expect("g1-f3 should apply");
        assert_eq!(payload(&out), json!({"moves": ["g1-f3"]}));
    }
}
