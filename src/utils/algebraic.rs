//! Square name conversions.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by the FEN codec, the SAN parser and the renderer
//! payload.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert a square name (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::MalformedFen(format!(
            "invalid algebraic square: {square}"
        )));
    }

    let file = file_from_byte(bytes[0]).ok_or_else(|| {
        ChessErrors::MalformedFen(format!("invalid algebraic file: {}", bytes[0] as char))
    })?;
    let rank = rank_from_byte(bytes[1]).ok_or_else(|| {
        ChessErrors::MalformedFen(format!("invalid algebraic rank: {}", bytes[1] as char))
    })?;

    Ok(rank * 8 + file)
}

/// Convert a square index (`0..=63`) to its name (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + (square / 8) % 8);
    format!("{file_char}{rank_char}")
}

/// `b'a'..=b'h'` to a 0-based file.
#[inline]
pub fn file_from_byte(byte: u8) -> Option<u8> {
    (b'a'..=b'h').contains(&byte).then(|| byte - b'a')
}

/// `b'1'..=b'8'` to a 0-based rank.
#[inline]
pub fn rank_from_byte(byte: u8) -> Option<u8> {
    (b'1'..=b'8').contains(&byte).then(|| byte - b'1')
}

#[inline]
pub fn file_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_char(rank: u8) -> char {
    char::from(b'1' + rank)
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, file_from_byte, rank_from_byte, square_to_algebraic};

    #[test]
    fn square_names_map_to_corner_indices() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
        assert_eq!(square_to_algebraic(43), "d6");
    }

    #[test]
    fn rejects_out_of_board_names() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(algebraic_to_square("e44").is_err());
        assert_eq!(file_from_byte(b'h'), Some(7));
        assert_eq!(rank_from_byte(b'0'), None);
    }
}
