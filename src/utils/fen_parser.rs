//! FEN-to-GameState parser.
//!
//! Decodes the placement field into a `Position` and the remaining five fields
//! into the auxiliary state of a `GameState`. Exactly six space-separated
//! fields are required.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState, position::Position};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| malformed("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| malformed("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| malformed("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| malformed("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| malformed("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(malformed("extra trailing fields"));
    }

    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| malformed(&format!("invalid fullmove number: {fullmove_part}")))?;
    if fullmove_number == 0 {
        return Err(malformed("fullmove number must be positive"));
    }

    Ok(GameState {
        position: fen_to_position(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part)?,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| malformed(&format!("invalid halfmove clock: {halfmove_part}")))?,
        fullmove_number,
    })
}

/// Decode a FEN placement field (ranks 8 to 1, `/`-separated).
///
/// Digit runs expand to empty squares. Two adjacent digits are rejected so
/// that every accepted field re-encodes to itself.
pub fn fen_to_position(board_part: &str) -> ChessResult<Position> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks"));
    }

    let mut position = Position::empty();

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;
        let mut previous_was_digit = false;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(&format!("invalid empty-square count '{ch}'")));
                }
                if previous_was_digit {
                    return Err(malformed(&format!("adjacent digit runs in rank '{rank_str}'")));
                }
                file += empty_count as u8;
                previous_was_digit = true;
            } else {
                let piece = Piece::from_code(ch).ok_or_else(|| {
                    malformed(&format!("invalid piece character '{ch}' in board layout"))
                })?;
                if file >= 8 {
                    return Err(malformed(&format!("rank '{rank_str}' has too many files")));
                }
                position.put(board_rank * 8 + file, piece);
                file += 1;
                previous_was_digit = false;
            }

            if file > 8 {
                return Err(malformed(&format!("rank '{rank_str}' has too many files")));
            }
        }

        if file != 8 {
            return Err(malformed(&format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(position)
}

pub fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(malformed(&format!("invalid side-to-move field: {side_part}"))),
    }
}

pub fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }
    if castling_part.is_empty() {
        return Err(malformed("empty castling rights field"));
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(malformed(&format!("invalid castling rights character: {ch}"))),
        };
        if rights & flag != 0 {
            return Err(malformed(&format!("duplicate castling rights character: {ch}")));
        }
        rights |= flag;
    }

    Ok(rights)
}

pub fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    if !matches!(rank_of(square), 2 | 5) {
        return Err(malformed(&format!(
            "en-passant square must be on rank 3 or 6: {en_passant_part}"
        )));
    }

    Ok(Some(square))
}

fn malformed(detail: &str) -> ChessErrors {
    ChessErrors::MalformedFen(detail.to_owned())
}
