//! SAN-driven game replay with cached navigation.
//!
//! A `GameReplay` owns one `GameState` and the history of every ply applied
//! to it. Moves enter as SAN; navigation afterwards reuses the recorded
//! `CoordinateMove`s and the by-index logs instead of resolving SAN again.
//! Each replay is independent, so separate games can run on separate threads.

use tracing::{debug, error, warn};

use crate::attacks::attack_detection::attackers_to_square;
use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::notation::coordinate_move::CoordinateMove;
use crate::notation::move_applier::apply_descriptor;
use crate::notation::san_parser::{parse_san, CheckMarker, MoveDescriptor};
use crate::replay::replay_config::ReplayConfig;
use crate::replay::replay_history::{PlyRecord, ReplayHistory};
use crate::utils::algebraic::square_to_algebraic;
use crate::utils::movetext::san_tokens;
use crate::validation::legality::has_any_legal_move;
use crate::validation::termination::{game_status, GameStatus};

#[derive(Debug, Clone)]
pub struct GameReplay {
    config: ReplayConfig,
    initial: GameState,
    state: GameState,
    history: ReplayHistory,
    cursor: usize,
}

impl GameReplay {
    pub fn new(config: ReplayConfig) -> ChessResult<Self> {
        let initial = config.start_state()?;
        Ok(Self {
            history: ReplayHistory::new(&initial),
            state: initial.clone(),
            initial,
            config,
            cursor: 0,
        })
    }

    /// Replay `moves` in order from the configured start.
    pub fn from_san_moves<S: AsRef<str>>(moves: &[S], config: ReplayConfig) -> ChessResult<Self> {
        let mut replay = Self::new(config)?;
        for san in moves {
            replay.push_san(san.as_ref())?;
        }
        Ok(replay)
    }

    /// Replay raw movetext (move numbers, comments and results allowed).
    pub fn from_movetext(text: &str, config: ReplayConfig) -> ChessResult<Self> {
        Self::from_san_moves(&san_tokens(text), config)
    }

    #[inline]
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// State at the current ply.
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    /// Number of plies applied so far; the current ply is `0..=len()`.
    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn current_ply(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn plies(&self) -> &[PlyRecord] {
        self.history.plies()
    }

    #[inline]
    pub fn history(&self) -> &ReplayHistory {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        game_status(&self.state)
    }

    /// Apply one SAN move at the current ply.
    ///
    /// Plies after the cursor are discarded first. On failure the replay is
    /// left exactly as it was.
    pub fn push_san(&mut self, san: &str) -> ChessResult<&PlyRecord> {
        let ply = self.cursor;
        match self.try_push_san(san) {
            Ok(()) => self
                .history
                .ply(ply)
                .ok_or_else(|| ChessErrors::InvalidMove(format!("ply {ply} missing after apply"))),
            Err(err) => {
                error!(ply = ply + 1, san, error = %err, "replay aborted");
                Err(err)
            }
        }
    }

    fn try_push_san(&mut self, san: &str) -> ChessResult<()> {
        let descriptor = parse_san(san)?;
        if descriptor == MoveDescriptor::Null && !self.config.allow_null_moves {
            return Err(ChessErrors::InvalidNotation(san.to_owned()));
        }

        let before = self.state.clone();
        let mut after = self.state.clone();
        let coordinate_move = apply_descriptor(&mut after, &descriptor)?;

        if self.config.verify_check_markers {
            verify_marker(self.cursor + 1, &descriptor, &after);
        }

        debug!(ply = self.cursor + 1, san, delta = %coordinate_move, "applied ply");

        let record = PlyRecord {
            san: san.to_owned(),
            descriptor,
            mover: before.side_to_move,
            coordinate_move,
        };
        self.history.push(self.cursor, &before, record, &after);
        self.state = after;
        self.cursor += 1;
        Ok(())
    }

    /// Undo the ply before the cursor. Returns the reverted move, or `None`
    /// (leaving the state as it was) when the history does not cover it.
    pub fn step_backward(&mut self) -> Option<&CoordinateMove> {
        let index = self.cursor.checked_sub(1)?;
        let record = self.history.ply(index)?;
        if !self.history.restore_aux(index, &mut self.state) {
            return None;
        }

        record.coordinate_move.revert_on(&mut self.state.position);
        self.state.side_to_move = record.mover;
        if record.mover == Color::Dark {
            self.state.fullmove_number = self.state.fullmove_number.saturating_sub(1);
        }
        self.cursor = index;

        Some(&record.coordinate_move)
    }

    /// Redo the ply at the cursor. Returns the replayed move, or `None` when
    /// there is nothing recorded past the cursor.
    pub fn step_forward(&mut self) -> Option<&CoordinateMove> {
        let index = self.cursor;
        let record = self.history.ply(index)?;
        if !self.history.restore_aux(index + 1, &mut self.state) {
            return None;
        }

        record.coordinate_move.apply_to(&mut self.state.position);
        self.state.side_to_move = record.mover.opposite();
        if record.mover == Color::Dark {
            self.state.fullmove_number = self.state.fullmove_number.saturating_add(1);
        }
        self.cursor = index + 1;

        Some(&record.coordinate_move)
    }

    /// Move the cursor to `ply` (`0` is the starting position).
    pub fn go_to_ply(&mut self, ply: usize) -> ChessResult<()> {
        if ply > self.len() {
            return Err(ChessErrors::InvalidMove(format!(
                "ply {ply} is outside 0..={}",
                self.len()
            )));
        }

        while self.cursor > ply {
            self.step_backward();
        }
        while self.cursor < ply {
            self.step_forward();
        }
        Ok(())
    }

    /// FEN at `ply` without moving this replay's cursor.
    pub fn fen_at_ply(&self, ply: usize) -> ChessResult<String> {
        let mut probe = self.clone();
        probe.go_to_ply(ply)?;
        Ok(probe.state.get_fen())
    }
}

/// Marker the position after a move deserves, with the pieces giving check.
fn position_marker(after: &GameState) -> (Option<CheckMarker>, Vec<(Square, PieceKind)>) {
    let side = after.side_to_move;
    let checkers = after
        .position
        .king_square(side)
        .map(|king| attackers_to_square(&after.position, king, side.opposite()))
        .unwrap_or_default();

    let marker = if checkers.is_empty() {
        None
    } else if has_any_legal_move(&after.position, after.aux(), side) {
        Some(CheckMarker::Check)
    } else {
        Some(CheckMarker::Checkmate)
    };
    (marker, checkers)
}

fn verify_marker(ply: usize, descriptor: &MoveDescriptor, after: &GameState) {
    let (actual, checkers) = position_marker(after);
    let written = descriptor.marker();
    if written != actual {
        let checkers: Vec<String> = checkers
            .iter()
            .map(|&(square, kind)| format!("{}{}", kind.letter(), square_to_algebraic(square)))
            .collect();
        warn!(
            ply,
            san = %descriptor,
            written = ?written,
            actual = ?actual,
            checkers = ?checkers,
            "check marker disagrees with position"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{position_marker, GameReplay};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::notation::san_parser::CheckMarker;
    use crate::replay::replay_config::ReplayConfig;
    use crate::validation::termination::GameStatus;

    const SCHOLARS_MATE: [&str; 7] = ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"];

    fn replay(moves: &[&str]) -> GameReplay {
        GameReplay::from_san_moves(moves, ReplayConfig::default()).expect("game should replay")
    }

    #[test]
    fn replays_scholars_mate() {
        let game = replay(&SCHOLARS_MATE);
        assert_eq!(game.len(), 7);
        assert_eq!(
            game.state().get_fen(),
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
        );
        assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Light });
        assert_eq!(game.plies()[6].coordinate_move.to_string(), r#"{"moves":["h5-f7"],"remove":["p","f7"]}"#);
    }

    #[test]
    fn replays_movetext_with_disambiguation_and_long_castle() {
        let text = "1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7 \
                    8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 \
                    14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0";
        let config = ReplayConfig {
            verify_check_markers: true,
            ..ReplayConfig::default()
        };
        let game = GameReplay::from_movetext(text, config).expect("game should replay");

        assert_eq!(game.len(), 33);
        assert_eq!(game.plies()[21].coordinate_move.to_string(), r#"{"moves":["b8-d7"]}"#);
        assert_eq!(
            game.plies()[22].coordinate_move.to_string(),
            r#"{"moves":["e1-c1","a1-d1"]}"#
        );
        assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Light });
    }

    #[test]
    fn navigation_restores_every_ply() {
        let moves = [
            "e4", "d5", "exd5", "c6", "dxc6", "Nf6", "cxb7", "Bg4", "bxa8=Q", "e5", "Nf3", "Bc5",
            "Be2", "Ke7", "O-O",
        ];
        let mut game = replay(&moves);

        let forward_fens: Vec<String> = (0..=game.len())
            .map(|ply| game.fen_at_ply(ply).expect("ply should exist"))
            .collect();
        assert_eq!(forward_fens[0], STARTING_POSITION_FEN);
        assert_eq!(forward_fens[moves.len()], game.state().get_fen());

        for ply in (0..moves.len()).rev() {
            game.step_backward().expect("history should allow stepping back");
            assert_eq!(game.state().get_fen(), forward_fens[ply], "backward to ply {ply}");
        }
        assert!(game.step_backward().is_none());

        for ply in 1..=moves.len() {
            game.step_forward().expect("history should allow stepping forward");
            assert_eq!(game.state().get_fen(), forward_fens[ply], "forward to ply {ply}");
        }
        assert!(game.step_forward().is_none());
    }

    #[test]
    fn go_to_ply_jumps_and_rejects_out_of_range() {
        let mut game = replay(&SCHOLARS_MATE);
        game.go_to_ply(2).expect("ply 2 exists");
        assert_eq!(
            game.state().get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
        assert_eq!(game.current_ply(), 2);

        assert!(matches!(game.go_to_ply(8), Err(ChessErrors::InvalidMove(_))));
        assert_eq!(game.current_ply(), 2);

        let fen = game.fen_at_ply(0).expect("ply 0 exists");
        assert_eq!(fen, STARTING_POSITION_FEN);
        assert_eq!(game.current_ply(), 2);
    }

    #[test]
    fn pushing_mid_history_branches() {
        let mut game = replay(&["e4", "e5", "Nf3"]);
        game.go_to_ply(1).expect("ply 1 exists");
        game.push_san("c5").expect("c5 should apply");

        assert_eq!(game.len(), 2);
        assert_eq!(
            game.state().get_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
        );
        assert_eq!(game.history().en_passant_by_index().len(), 3);
    }

    #[test]
    fn failed_move_leaves_replay_untouched() {
        let mut game = replay(&["e4", "e5"]);
        let before = game.state().clone();

        assert!(matches!(game.push_san("Ke3"), Err(ChessErrors::NoLegalSource(_))));
        assert!(matches!(game.push_san("e9"), Err(ChessErrors::InvalidNotation(_))));
        assert_eq!(game.state(), &before);
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn stepping_past_recorded_history_changes_nothing() {
        let mut game = replay(&["e4", "e5", "Nf3"]);
        game.history.truncate(1);
        let before = game.state().clone();

        assert!(game.step_backward().is_none());
        assert!(game.step_forward().is_none());
        assert_eq!(game.state(), &before);
        assert_eq!(game.current_ply(), 3);
    }

    #[test]
    fn position_marker_names_the_checking_pieces() {
        let mate = replay(&SCHOLARS_MATE);
        assert_eq!(
            position_marker(mate.state()),
            (Some(CheckMarker::Checkmate), vec![(53, PieceKind::Queen)])
        );

        let check = replay(&["e4", "f5", "Qh5+"]);
        assert_eq!(
            position_marker(check.state()),
            (Some(CheckMarker::Check), vec![(39, PieceKind::Queen)])
        );

        let quiet = replay(&["e4"]);
        assert_eq!(position_marker(quiet.state()), (None, Vec::new()));
    }

    #[test]
    fn null_moves_follow_configuration() {
        let game = replay(&["e4", "--", "d4"]);
        assert_eq!(game.state().side_to_move, Color::Dark);
        assert!(game.plies()[1].coordinate_move.is_null());

        let strict = ReplayConfig {
            allow_null_moves: false,
            ..ReplayConfig::default()
        };
        let err = GameReplay::from_san_moves(&["e4", "--"], strict).expect_err("null move should be rejected");
        assert_eq!(err, ChessErrors::InvalidNotation("--".to_owned()));
    }

    #[test]
    fn custom_start_and_movetext() {
        let config = ReplayConfig {
            start_fen: Some("4k3/P7/8/8/8/8/8/4K3 w - - 0 1".to_owned()),
            verify_check_markers: true,
            ..ReplayConfig::default()
        };
        let game = GameReplay::from_movetext("1. a8=Q+ {check} Kd7 2. Qb7+ *", config)
            .expect("movetext should replay");
        assert_eq!(game.len(), 3);
        assert_eq!(game.state().get_fen(), "8/1Q1k4/8/8/8/8/8/4K3 b - - 2 2");
    }

    #[test]
    fn independent_games_replay_on_separate_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let moves: &[&str] = if i % 2 == 0 { &SCHOLARS_MATE } else { &["d4", "d5", "c4"] };
                    GameReplay::from_san_moves(moves, ReplayConfig::default())
                        .expect("game should replay")
                        .state()
                        .get_fen()
                })
            })
            .collect();

        let fens: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().expect("replay thread should finish"))
            .collect();
        assert_eq!(fens[0], fens[2]);
        assert_eq!(fens[1], fens[3]);
        assert_ne!(fens[0], fens[1]);
    }
}
