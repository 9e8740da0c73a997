//! Cross-check between the coordinate validator and the SAN replay path.
//!
//! A seeded random walk picks each ply from the validator's legal moves,
//! writes it twice as SAN (minimal disambiguation and fully qualified) and
//! replays both spellings through the SAN pipeline. The walk records a
//! disagreement when the resolver picks a different origin than the
//! validator did, when either spelling fails to apply, or when the two
//! replays reach different FENs.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{castling_geometry_for_king_move, CastlingSide};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::notation::move_applier::apply_san;
use crate::notation::san_parser::{fully_qualified_san, StandardMove};
use crate::validation::legality::{is_promotion_move, legal_moves};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone)]
pub struct AgreementConfig {
    pub games: u16,
    pub max_plies: u16,
    pub base_seed: u64,
    pub start_fen: Option<String>,
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            games: 16,
            max_plies: 120,
            base_seed: 0,
            start_fen: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disagreement {
    pub seed: u64,
    pub ply: usize,
    pub fen: String,
    pub from: Square,
    pub to: Square,
    pub san: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct WalkResult {
    pub plies: usize,
    /// The walk stopped because the side to move had no legal move.
    pub reached_terminal: bool,
    pub final_fen: String,
    pub disagreement: Option<Disagreement>,
}

#[derive(Debug, Clone, Default)]
pub struct AgreementStats {
    pub games: u16,
    pub plies_checked: usize,
    pub terminal_games: u16,
    pub disagreements: Vec<Disagreement>,
}

impl AgreementStats {
    pub fn report(&self) -> String {
        format!(
            "games={} plies={} terminal={} disagreements={}",
            self.games,
            self.plies_checked,
            self.terminal_games,
            self.disagreements.len()
        )
    }
}

/// Run one seeded walk from the configured start position.
pub fn run_agreement_walk(seed: u64, config: &AgreementConfig) -> ChessResult<WalkResult> {
    let start = match &config.start_fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new_game(),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut minimal = start.clone();
    let mut qualified = start;
    let mut result = WalkResult::default();

    for ply in 0..usize::from(config.max_plies) {
        let side = minimal.side_to_move;
        let moves = legal_moves(&minimal.position, minimal.aux(), side);
        if moves.is_empty() {
            result.reached_terminal = true;
            break;
        }

        let (from, to) = moves[rng.random_range(0..moves.len())];
        let promotion = match minimal.position.piece_at(from) {
            Some(piece) if piece.kind == PieceKind::Pawn && is_promotion_move(side, from, to) => {
                Some(PROMOTION_KINDS[rng.random_range(0..PROMOTION_KINDS.len())])
            }
            _ => None,
        };

        let fen_before = minimal.get_fen();
        let short = minimal_san(&minimal, &moves, from, to, promotion);
        let long = qualified_san(&minimal, from, to, promotion);

        let detail = match (apply_san(&mut minimal, &short), apply_san(&mut qualified, &long)) {
            (Ok(short_move), Ok(_)) if short_move.moves.first() != Some(&(from, to)) => Some(format!(
                "resolver chose {:?}, validator chose {:?}",
                short_move.moves.first(),
                (from, to)
            )),
            (Ok(_), Ok(_)) if minimal.get_fen() != qualified.get_fen() => Some(format!(
                "'{long}' reached {} but '{short}' reached {}",
                qualified.get_fen(),
                minimal.get_fen()
            )),
            (Ok(_), Ok(_)) => None,
            (Err(err), _) => Some(format!("'{short}' failed: {err}")),
            (_, Err(err)) => Some(format!("'{long}' failed: {err}")),
        };

        result.plies = ply + 1;
        if let Some(detail) = detail {
            warn!(seed, ply = ply + 1, fen = %fen_before, san = %short, %detail, "paths disagree");
            result.disagreement = Some(Disagreement {
                seed,
                ply: ply + 1,
                fen: fen_before,
                from,
                to,
                san: short,
                detail,
            });
            break;
        }
    }

    result.final_fen = minimal.get_fen();
    debug!(seed, plies = result.plies, terminal = result.reached_terminal, "walk finished");
    Ok(result)
}

/// Run `config.games` walks with consecutive seeds from `config.base_seed`.
pub fn run_agreement_series(config: &AgreementConfig) -> ChessResult<AgreementStats> {
    let mut stats = AgreementStats {
        games: config.games,
        ..AgreementStats::default()
    };

    for i in 0..config.games {
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let walk = run_agreement_walk(seed, config)?;

        stats.plies_checked = stats.plies_checked.saturating_add(walk.plies);
        if walk.reached_terminal {
            stats.terminal_games += 1;
        }
        if let Some(disagreement) = walk.disagreement {
            stats.disagreements.push(disagreement);
        }
    }

    Ok(stats)
}

fn castle_san(game_state: &GameState, from: Square, to: Square) -> Option<&'static str> {
    let piece = game_state.position.piece_at(from)?;
    if piece.kind != PieceKind::King {
        return None;
    }
    let geometry = castling_geometry_for_king_move(piece.color, from, to)?;
    Some(if geometry.king_to > geometry.king_from {
        castle_text(CastlingSide::KingSide)
    } else {
        castle_text(CastlingSide::QueenSide)
    })
}

const fn castle_text(side: CastlingSide) -> &'static str {
    match side {
        CastlingSide::KingSide => "O-O",
        CastlingSide::QueenSide => "O-O-O",
    }
}

fn is_capture(game_state: &GameState, from: Square, to: Square) -> bool {
    !game_state.position.is_empty_square(to)
        || matches!(game_state.position.piece_at(from), Some(p) if p.kind == PieceKind::Pawn && file_of(from) != file_of(to))
}

fn qualified_san(game_state: &GameState, from: Square, to: Square, promotion: Option<PieceKind>) -> String {
    if let Some(text) = castle_san(game_state, from, to) {
        return text.to_owned();
    }
    let kind = game_state
        .position
        .piece_at(from)
        .map_or(PieceKind::Pawn, |piece| piece.kind);
    fully_qualified_san(kind, from, to, is_capture(game_state, from, to), promotion)
}

/// SAN with only the hints needed to separate `from` from other legal
/// origins of the same piece kind.
fn minimal_san(
    game_state: &GameState,
    legal: &[(Square, Square)],
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> String {
    if let Some(text) = castle_san(game_state, from, to) {
        return text.to_owned();
    }

    let position = &game_state.position;
    let kind = position.piece_at(from).map_or(PieceKind::Pawn, |piece| piece.kind);
    let capture = is_capture(game_state, from, to);

    let (file_hint, rank_hint) = if kind == PieceKind::Pawn {
        (capture.then_some(file_of(from)), None)
    } else {
        let rivals: Vec<Square> = legal
            .iter()
            .filter(|&&(other, dest)| {
                dest == to
                    && other != from
                    && position.piece_at(other).map(|piece| piece.kind) == Some(kind)
            })
            .map(|&(other, _)| other)
            .collect();

        if rivals.is_empty() {
            (None, None)
        } else if rivals.iter().all(|&sq| file_of(sq) != file_of(from)) {
            (Some(file_of(from)), None)
        } else if rivals.iter().all(|&sq| rank_of(sq) != rank_of(from)) {
            (None, Some(rank_of(from)))
        } else {
            (Some(file_of(from)), Some(rank_of(from)))
        }
    };

    StandardMove {
        piece: kind,
        file_hint,
        rank_hint,
        is_capture: capture,
        destination: to,
        promotion,
        marker: None,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_san_disambiguates_only_when_needed() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").expect("FEN should parse");
        let legal = legal_moves(&game.position, game.aux(), Color::Light);

        assert_eq!(minimal_san(&game, &legal, 0, 4, None), "Rae1");
        assert_eq!(minimal_san(&game, &legal, 0, 8, None), "Ra2");
        assert_eq!(qualified_san(&game, 0, 4, None), "Ra1e1");

        let stacked = GameState::from_fen("R7/7k/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let legal = legal_moves(&stacked.position, stacked.aux(), Color::Light);
        assert_eq!(minimal_san(&stacked, &legal, 0, 24, None), "R1a4");
    }

    #[test]
    fn pinned_rival_needs_no_hint() {
        // The c3 knight is pinned, so Ne2 from g1 is unambiguous.
        let game = GameState::from_fen("4k3/8/8/8/1b6/2N5/8/4K1N1 w - - 0 1").expect("FEN should parse");
        let legal = legal_moves(&game.position, game.aux(), Color::Light);
        assert_eq!(minimal_san(&game, &legal, 6, 12, None), "Ne2");
    }

    #[test]
    fn castling_and_pawn_captures_spell_correctly() {
        let game = GameState::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").expect("FEN should parse");
        let legal = legal_moves(&game.position, game.aux(), Color::Light);

        assert_eq!(minimal_san(&game, &legal, 4, 6, None), "O-O");
        assert_eq!(qualified_san(&game, 4, 2, None), "O-O-O");
        assert_eq!(minimal_san(&game, &legal, 36, 43, None), "exd6");
        assert_eq!(qualified_san(&game, 36, 43, None), "e5xd6");
    }

    #[test]
    fn seeded_walks_agree_and_repeat() {
        let config = AgreementConfig {
            games: 6,
            max_plies: 80,
            base_seed: 7,
            start_fen: None,
        };
        let stats = run_agreement_series(&config).expect("series should run");
        assert!(stats.disagreements.is_empty(), "{:?}", stats.disagreements);
        assert!(stats.plies_checked > 0);

        let first = run_agreement_walk(11, &config).expect("walk should run");
        let second = run_agreement_walk(11, &config).expect("walk should run");
        assert_eq!(first.final_fen, second.final_fen);
        assert_eq!(first.plies, second.plies);
    }

    #[test]
    fn walks_from_tactical_start_positions_agree() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
        ] {
            let config = AgreementConfig {
                games: 3,
                max_plies: 60,
                base_seed: 100,
                start_fen: Some(fen.to_owned()),
            };
            let stats = run_agreement_series(&config).expect("series should run");
            assert!(stats.disagreements.is_empty(), "{fen}: {:?}", stats.disagreements);
        }
    }
}
