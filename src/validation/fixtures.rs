//! Literal FEN/move pairs checked against both the SAN replay path and the
//! coordinate validator.
//!
//! A fixture with `fen_after` is a legal move: the validator must accept it
//! and the SAN path must resolve the same origin and reach `fen_after`. A
//! fixture without one must be rejected by both paths.
//!
//! The SAN path only tests own-king safety while several origins compete, so
//! a lone pinned piece is deliberately absent from the rejected set.

use crate::game_state::game_state::GameState;
use crate::notation::move_applier::apply_san;
use crate::utils::algebraic::algebraic_to_square;
use crate::validation::legality::is_legal_move_fen;

pub struct SharedFixture {
    pub name: &'static str,
    pub fen: &'static str,
    pub san: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub fen_after: Option<&'static str>,
}

pub const SHARED_FIXTURES: &[SharedFixture] = &[
    SharedFixture {
        name: "opening double step",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        san: "e4",
        from: "e2",
        to: "e4",
        fen_after: Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"),
    },
    SharedFixture {
        name: "en passant",
        fen: "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        san: "exd6",
        from: "e5",
        to: "d6",
        fen_after: Some("4k3/8/3P4/8/8/8/8/4K3 b - - 0 2"),
    },
    SharedFixture {
        name: "light kingside castle",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        san: "O-O",
        from: "e1",
        to: "g1",
        fen_after: Some("r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1"),
    },
    SharedFixture {
        name: "dark queenside castle",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 4 9",
        san: "O-O-O",
        from: "e8",
        to: "c8",
        fen_after: Some("2kr3r/8/8/8/8/8/8/R3K2R w KQ - 5 10"),
    },
    SharedFixture {
        name: "capture promotion to knight",
        fen: "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1",
        san: "axb8=N",
        from: "a7",
        to: "b8",
        fen_after: Some("1N2k3/8/8/8/8/8/8/4K3 b - - 0 1"),
    },
    SharedFixture {
        name: "pinned rival knight",
        fen: "4k3/8/8/8/1b6/2N5/8/4K1N1 w - - 0 1",
        san: "Ne2",
        from: "g1",
        to: "e2",
        fen_after: Some("4k3/8/8/8/1b6/2N5/4N3/4K3 b - - 1 1"),
    },
    SharedFixture {
        name: "rook takes rook on its corner",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        san: "Rxa8+",
        from: "a1",
        to: "a8",
        fen_after: Some("R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1"),
    },
    SharedFixture {
        name: "pawn cannot triple step",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        san: "e5",
        from: "e2",
        to: "e5",
        fen_after: None,
    },
    SharedFixture {
        name: "en passant without target",
        fen: "4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2",
        san: "exd6",
        from: "e5",
        to: "d6",
        fen_after: None,
    },
    SharedFixture {
        name: "castle without right",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1",
        san: "O-O",
        from: "e1",
        to: "g1",
        fen_after: None,
    },
    SharedFixture {
        name: "rook behind rook",
        fen: "4k3/8/8/8/8/8/8/R1R3K1 w - - 0 1",
        san: "Rae1",
        from: "a1",
        to: "e1",
        fen_after: None,
    },
];

fn aux_fields(fen: &str) -> (&str, &str) {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    (fields[2], fields[3])
}

fn piece_code_at(game: &GameState, square: &str) -> String {
    let square = algebraic_to_square(square).expect("fixture square should parse");
    game.position
        .piece_at(square)
        .map(|piece| piece.code().to_string())
        .unwrap_or_default()
}

#[test]
fn validator_agrees_with_fixtures() {
    for fixture in SHARED_FIXTURES {
        let game = GameState::from_fen(fixture.fen).expect("fixture FEN should parse");
        let (castling, en_passant) = aux_fields(fixture.fen);
        let piece = piece_code_at(&game, fixture.from);

        let legal = is_legal_move_fen(fixture.fen, fixture.from, fixture.to, &piece, castling, en_passant);
        assert_eq!(legal, fixture.fen_after.is_some(), "{}", fixture.name);
    }
}

#[test]
fn san_path_agrees_with_fixtures() {
    for fixture in SHARED_FIXTURES {
        let mut game = GameState::from_fen(fixture.fen).expect("fixture FEN should parse");
        let snapshot = game.clone();
        let outcome = apply_san(&mut game, fixture.san);

        match fixture.fen_after {
            Some(expected) => {
                let delta = outcome.unwrap_or_else(|e| panic!("{}: {e}", fixture.name));
                let from = algebraic_to_square(fixture.from).expect("fixture square should parse");
                let to = algebraic_to_square(fixture.to).expect("fixture square should parse");
                assert_eq!(delta.moves.first(), Some(&(from, to)), "{}", fixture.name);
                assert_eq!(game.get_fen(), expected, "{}", fixture.name);
            }
            None => {
                assert!(outcome.is_err(), "{} should be rejected", fixture.name);
                assert_eq!(game, snapshot, "{}", fixture.name);
            }
        }
    }
}
