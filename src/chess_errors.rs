//! Errors used throughout the replay core.
//!
//! `ChessErrors` is the single error type returned by FEN decoding, SAN
//! parsing, source-square resolution and move application. Every variant
//! represents malformed or inconsistent input: a well-formed game record
//! replayed from its true starting position never produces one.
//!
//! The coordinate validator is the exception to this rule. Interactive input
//! routinely proposes illegal moves, so `validation::legality` reports
//! illegality as `false` and never surfaces a `ChessErrors`.

use thiserror::Error;

/// Unified error type for the replay core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A FEN string, placement field, square name or piece code could not be
    /// decoded.
    ///
    /// Payload: a description naming the offending field or character.
    #[error("malformed FEN: {0}")]
    MalformedFen(String),

    /// A SAN token does not match the move grammar.
    #[error("invalid SAN notation: '{0}'")]
    InvalidNotation(String),

    /// More than one origin square survived source resolution.
    #[error("ambiguous move '{san}': candidates {candidates:?}")]
    AmbiguousMove { san: String, candidates: Vec<String> },

    /// No origin square survived source resolution.
    #[error("no legal source square for '{0}'")]
    NoLegalSource(String),

    /// The applier was handed a descriptor it cannot execute on the board.
    #[error("invalid move: {0}")]
    InvalidMove(String),
}

/// Result type alias for replay core operations.
pub type ChessResult<T> = Result<T, ChessErrors>;

#[cfg(test)]
mod tests {
    use super::ChessErrors;

    #[test]
    fn ambiguous_move_message_lists_candidates() {
        let err = ChessErrors::AmbiguousMove {
            san: "Re1".to_owned(),
            candidates: vec!["a1".to_owned(), "h1".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "ambiguous move 'Re1': candidates [\"a1\", \"h1\"]"
        );
    }
}
