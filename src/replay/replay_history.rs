//! Per-ply replay records and the by-index auxiliary logs.
//!
//! Entry `i` of every log holds the value in force *before* ply `i`; the
//! final entry holds the value after the last ply. Logs are rewritten at the
//! current index before a ply is appended, so stepping backward or forward
//! restores auxiliary state without re-resolving any SAN.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::notation::coordinate_move::CoordinateMove;
use crate::notation::san_parser::MoveDescriptor;

/// One applied ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyRecord {
    pub san: String,
    pub descriptor: MoveDescriptor,
    pub mover: Color,
    pub coordinate_move: CoordinateMove,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayHistory {
    plies: Vec<PlyRecord>,
    castling_rights_by_index: Vec<CastlingRights>,
    en_passant_by_index: Vec<Option<Square>>,
    halfmove_by_index: Vec<u16>,
}

impl ReplayHistory {
    pub fn new(start: &GameState) -> Self {
        let mut history = Self::default();
        history.record_aux(0, start);
        history
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.plies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    #[inline]
    pub fn plies(&self) -> &[PlyRecord] {
        &self.plies
    }

    #[inline]
    pub fn ply(&self, index: usize) -> Option<&PlyRecord> {
        self.plies.get(index)
    }

    pub fn castling_rights_by_index(&self) -> &[CastlingRights] {
        &self.castling_rights_by_index
    }

    pub fn en_passant_by_index(&self) -> &[Option<Square>] {
        &self.en_passant_by_index
    }

    pub fn halfmove_by_index(&self) -> &[u16] {
        &self.halfmove_by_index
    }

    /// Drop every ply at or after `index` together with the log entries past
    /// it.
    pub fn truncate(&mut self, index: usize) {
        self.plies.truncate(index);
        self.castling_rights_by_index.truncate(index + 1);
        self.en_passant_by_index.truncate(index + 1);
        self.halfmove_by_index.truncate(index + 1);
    }

    /// Append `record` as ply `index`. `before` and `after` are the states
    /// around it.
    pub fn push(&mut self, index: usize, before: &GameState, record: PlyRecord, after: &GameState) {
        self.truncate(index);
        self.record_aux(index, before);
        self.plies.push(record);
        self.record_aux(index + 1, after);
    }

    fn record_aux(&mut self, index: usize, state: &GameState) {
        self.castling_rights_by_index.truncate(index);
        self.en_passant_by_index.truncate(index);
        self.halfmove_by_index.truncate(index);

        self.castling_rights_by_index.push(state.castling_rights);
        self.en_passant_by_index.push(state.en_passant_square);
        self.halfmove_by_index.push(state.halfmove_clock);
    }

    /// Copy the logged auxiliary values for `index` into `state`.
    pub fn restore_aux(&self, index: usize, state: &mut GameState) -> bool {
        let (Some(&castling), Some(&en_passant), Some(&halfmove)) = (
            self.castling_rights_by_index.get(index),
            self.en_passant_by_index.get(index),
            self.halfmove_by_index.get(index),
        ) else {
            return false;
        };

        state.castling_rights = castling;
        state.en_passant_square = en_passant;
        state.halfmove_clock = halfmove;
        true
    }
}
