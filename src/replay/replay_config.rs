//! Replay configuration with environment overrides.

use tracing::warn;

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;

pub const VERIFY_MARKERS_ENV: &str = "CHESS_REPLAY_VERIFY_MARKERS";
pub const ALLOW_NULL_ENV: &str = "CHESS_REPLAY_ALLOW_NULL";
pub const START_FEN_ENV: &str = "CHESS_REPLAY_START_FEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Compare each move's `+`/`#` suffix with the resulting position and log
    /// disagreements.
    pub verify_check_markers: bool,
    /// Accept `--` null moves.
    pub allow_null_moves: bool,
    /// Starting position; `None` means the standard initial position.
    pub start_fen: Option<String>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            verify_check_markers: false,
            allow_null_moves: true,
            start_fen: None,
        }
    }
}

impl ReplayConfig {
    /// Defaults overlaid with the `CHESS_REPLAY_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values returned by `lookup` for the `CHESS_REPLAY_*` keys.
    /// Unrecognized boolean values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(VERIFY_MARKERS_ENV) {
            match parse_flag(&value) {
                Some(flag) => self.verify_check_markers = flag,
                None => warn!(key = VERIFY_MARKERS_ENV, value = %value, "ignoring unrecognized flag"),
            }
        }
        if let Some(value) = lookup(ALLOW_NULL_ENV) {
            match parse_flag(&value) {
                Some(flag) => self.allow_null_moves = flag,
                None => warn!(key = ALLOW_NULL_ENV, value = %value, "ignoring unrecognized flag"),
            }
        }
        if let Some(fen) = lookup(START_FEN_ENV) {
            let fen = fen.trim();
            if !fen.is_empty() {
                self.start_fen = Some(fen.to_owned());
            }
        }
        self
    }

    /// Game state the replay starts from.
    pub fn start_state(&self) -> ChessResult<GameState> {
        match &self.start_fen {
            Some(fen) => GameState::from_fen(fen),
            None => Ok(GameState::new_game()),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use std::collections::HashMap;

    fn overlay(pairs: &[(&str, &str)]) -> ReplayConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ReplayConfig::default().with_overrides(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = ReplayConfig::default();
        assert!(!config.verify_check_markers);
        assert!(config.allow_null_moves);
        assert_eq!(config.start_fen, None);
        assert_eq!(
            config.start_state().expect("default start should parse").get_fen(),
            STARTING_POSITION_FEN
        );
    }

    #[test]
    fn overrides_apply_and_bad_flags_are_ignored() {
        let config = overlay(&[
            (VERIFY_MARKERS_ENV, "TRUE"),
            (ALLOW_NULL_ENV, "maybe"),
            (START_FEN_ENV, " 4k3/8/8/8/8/8/8/4K3 w - - 0 1 "),
        ]);
        assert!(config.verify_check_markers);
        assert!(config.allow_null_moves);
        assert_eq!(config.start_fen.as_deref(), Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));

        let config = overlay(&[(ALLOW_NULL_ENV, "off"), (START_FEN_ENV, "")]);
        assert!(!config.allow_null_moves);
        assert_eq!(config.start_fen, None);
    }

    #[test]
    fn bad_start_fen_surfaces_on_use() {
        let config = overlay(&[(START_FEN_ENV, "8/8 w - - 0 1")]);
        assert!(matches!(config.start_state(), Err(ChessErrors::MalformedFen(_))));
    }
}
